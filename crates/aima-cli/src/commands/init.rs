//! The `aima init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("aima.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("quiz")?;
    write_if_missing(Path::new("quiz/questions.toml"), EXAMPLE_BANK)?;

    std::fs::create_dir_all("catalog")?;
    write_if_missing(Path::new("catalog/courses.toml"), EXAMPLE_CATALOG)?;

    println!("\nNext steps:");
    println!("  1. Edit aima.toml with your SMTP server (or set SMTP_HOST, SMTP_USER, SMTP_PASS)");
    println!("  2. Run: aima validate --bank quiz/questions.toml --catalog catalog");
    println!("  3. Run: aima serve");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# aima configuration

recipients = ["info@allureima.com", "harry@allureima.com"]
relay_url = "http://127.0.0.1:3000/api/send-email"

# Replace the built-in quiz and course schedule.
# question_bank = "quiz/questions.toml"
# catalog = "catalog"

[smtp]
host = "${SMTP_HOST}"
secure = true
user = "${SMTP_USER}"
password = "${SMTP_PASS}"
from = "Allure IMA <info@allureima.com>"

[server]
bind = "127.0.0.1:3000"
request_timeout_secs = 30
cors_origins = ["https://allureima.com"]
"#;

const EXAMPLE_BANK: &str = r#"[[questions]]
id = 1
prompt = "What do your clients typically request?"

[[questions.options]]
id = "natural"
label = "Natural, hair-like strokes"
scores = { microblading = 5, microshading = 1, combo = 3 }

[[questions.options]]
id = "powder"
label = "Soft, powdered look"
scores = { microblading = 1, microshading = 5, combo = 3 }

[[questions]]
id = 2
prompt = "What are your business goals?"

[[questions.options]]
id = "specialist"
label = "Specialize in one technique"
scores = { microblading = 5, microshading = 5, combo = 1 }

[[questions.options]]
id = "versatile"
label = "Offer comprehensive brow services"
scores = { microblading = 2, microshading = 2, combo = 5 }
"#;

const EXAMPLE_CATALOG: &str = r#"[[offerings]]
program = "microblading"
campus = "santa-ana"
start_date = "2025-04-25"
schedule = "Apr 25-27, 2025"
time_slot = "10:00 AM - 2:00 PM & 3:00 PM - 7:00 PM"
slots_left = 3

[[offerings]]
program = "microshading"
campus = "south-gate"
start_date = "2025-05-16"
is_hybrid = true
tag = "MOST POPULAR"

[[offerings]]
program = "combo"
campus = "santa-ana"
start_date = "2025-06-06"
schedule = "Jun 6-8 & 13-15, 2025"
status = "full"
"#;
