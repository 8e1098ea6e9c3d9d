//! aima CLI: quiz, course catalog, income calculator and form relay.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "aima",
    version,
    about = "Allure Institute of Micropigmentation Artistry tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the form relay and quiz/catalog API
    Serve {
        /// Bind address, overrides the config file
        #[arg(long)]
        bind: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a full set of quiz answers
    Quiz {
        /// Option ids in question order (e.g. "natural,drawing,subtle,focused,specialist")
        #[arg(long, value_delimiter = ',')]
        answers: Vec<String>,

        /// Headline language: en, es
        #[arg(long, default_value = "en")]
        lang: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the report as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Question bank TOML, overrides the config file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List upcoming course offerings
    Courses {
        /// Only this program: microblading, microshading, combo
        #[arg(long)]
        program: Option<String>,

        /// Hide full offerings
        #[arg(long)]
        available: bool,

        /// Catalog TOML file or directory, overrides the config file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Project income for a number of weekly clients
    Income {
        /// Clients per week (1-10)
        #[arg(long, default_value = "5")]
        clients: u32,

        /// Price per client in dollars (100-500, steps of 50)
        #[arg(long, default_value = "300")]
        price: u32,
    },

    /// Build and send an enrollment request
    Enroll {
        /// Program: microblading, microshading, combo
        #[arg(long)]
        program: String,

        /// Start date (YYYY-MM-DD); defaults to the program's first offering
        #[arg(long)]
        start_date: Option<String>,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: Option<String>,

        /// Pay by installments instead of in full
        #[arg(long)]
        installment: bool,

        /// How the student heard about the academy
        #[arg(long)]
        referral: Option<String>,

        #[arg(long)]
        goals: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Write the rendered email to this HTML file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Validate and render without sending
        #[arg(long)]
        dry_run: bool,

        /// Catalog TOML file or directory, overrides the config file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Send a form submission through the relay
    Send {
        /// Form type: contact, tour, enrollment
        #[arg(long)]
        form_type: String,

        /// Form data as inline JSON or a path to a JSON file
        #[arg(long)]
        data: String,

        /// Recipients (comma-separated), defaults to the configured ones
        #[arg(long, value_delimiter = ',')]
        to: Vec<String>,

        /// Write the rendered email to this HTML file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Validate and render without sending
        #[arg(long)]
        dry_run: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank and catalog TOML files
    Validate {
        /// Question bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create a starter config, question bank and catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aima=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { bind, config } => commands::serve::execute(bind, config).await,
        Commands::Quiz {
            answers,
            lang,
            format,
            output,
            bank,
            config,
        } => commands::quiz::execute(answers, lang, format, output, bank, config),
        Commands::Courses {
            program,
            available,
            catalog,
            config,
        } => commands::courses::execute(program, available, catalog, config),
        Commands::Income { clients, price } => commands::income::execute(clients, price),
        Commands::Enroll {
            program,
            start_date,
            first_name,
            last_name,
            phone,
            email,
            installment,
            referral,
            goals,
            notes,
            preview,
            dry_run,
            catalog,
            config,
        } => {
            let applicant = commands::enroll::Applicant {
                first_name,
                last_name,
                phone,
                email,
                installment,
                referral,
                goals,
                notes,
            };
            commands::enroll::execute(
                program, start_date, applicant, preview, dry_run, catalog, config,
            )
            .await
        }
        Commands::Send {
            form_type,
            data,
            to,
            preview,
            dry_run,
            config,
        } => commands::send::execute(form_type, data, to, preview, dry_run, config).await,
        Commands::Validate { bank, catalog } => commands::validate::execute(bank, catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
