use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use trustup24::config::Config;
use trustup24::provider::{
    validate_provider, Category, InMemoryProviderStore, ProviderFilter, ProviderStore,
};
use trustup24::scoring::{
    ExperienceLevel, MatchCriteria, ScoringEngine, ScoringError, Timeline, DEFAULT_MATCH_LIMIT,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_WRITE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug, Default)]
struct RankArgs {
    /// Preferred category (e.g. company-formation, legal-consulting)
    #[arg(long)]
    category: Option<String>,

    /// Required service identifier; repeat for several
    #[arg(long = "service")]
    services: Vec<String>,

    /// Preferred language
    #[arg(long)]
    language: Option<String>,

    /// urgent, fast, normal or flexible
    #[arg(long)]
    timeline: Option<String>,

    /// any, experienced or senior
    #[arg(long)]
    experience: Option<String>,

    /// Only rank providers in the requested category and language
    #[arg(long)]
    strict: bool,

    /// Number of matches to show (defaults to config, then 10)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank providers for a search (default if no subcommand)
    Rank(RankArgs),
    /// List providers with their trust scores
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Only verified providers
        #[arg(long)]
        verified: bool,
        /// Only featured providers
        #[arg(long)]
        featured: bool,
        /// Search name, id and services
        #[arg(long)]
        search: Option<String>,
        /// Only providers with at least this trust score
        #[arg(long = "min-trust")]
        min_trust: Option<u32>,
    },
    /// Count providers per category
    Categories,
    /// Show how a provider's trust score is made up
    Explain {
        /// Provider id
        id: String,
    },
    /// Write providers with computed trust scores to a JSON file
    Score {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Check provider records for data problems
    Validate,
}

#[derive(Parser, Debug)]
#[command(name = "trustup24")]
#[command(about = "Rank UAE business-service providers by trust and fit", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/trustup24/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Provider JSON file (overrides the config file)
    #[arg(short, long, global = true)]
    providers: Option<PathBuf>,

    /// Clamp trust scores into 70-95 for synthetic or estimated records
    #[arg(long, global = true)]
    estimated: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "trustup24=debug" } else { "warn" };
    let filter = std::env::var("TRUSTUP24_LOG").unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn parse_category(value: Option<&str>) -> Result<Option<Category>, ScoringError> {
    value
        .map(|v| v.parse::<Category>().map_err(ScoringError::InvalidArgument))
        .transpose()
}

fn build_criteria(args: &RankArgs) -> Result<MatchCriteria, ScoringError> {
    Ok(MatchCriteria {
        category: parse_category(args.category.as_deref())?,
        required_services: args.services.iter().cloned().collect(),
        language: args.language.clone(),
        timeline: args
            .timeline
            .as_deref()
            .map(str::parse::<Timeline>)
            .transpose()?
            .unwrap_or_default(),
        experience_level: args
            .experience
            .as_deref()
            .map(str::parse::<ExperienceLevel>)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank(RankArgs::default()));
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config: Config = match trustup24::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let mut effective_scoring = config.scoring.clone().unwrap_or_default();
    if cli.estimated {
        effective_scoring.use_estimation_floor = true;
    }
    if let Err(errors) = trustup24::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let Some(providers_path) = cli.providers.or(config.providers.clone()) else {
        eprintln!("No provider file given.");
        eprintln!("Pass --providers <FILE> or add it to ~/.config/trustup24/config.yaml:");
        eprintln!("  providers: /path/to/providers.json");
        std::process::exit(EXIT_CONFIG);
    };

    let provider_file = match trustup24::provider::read_provider_file(&providers_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Provider data error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    // validate reports unreadable records itself
    if !matches!(command, Commands::Validate) {
        for rejected in &provider_file.rejected {
            tracing::warn!(
                index = rejected.index,
                provider_id = rejected.id.as_deref().unwrap_or("-"),
                error = %rejected.error,
                "skipping unreadable provider record"
            );
        }
    }
    let rejected = provider_file.rejected;
    let store = InMemoryProviderStore::new(provider_file.providers);
    let engine = ScoringEngine::new(&effective_scoring);

    tracing::info!(
        providers = store.len(),
        reference_year = engine.reference_year(),
        estimation_floor = engine.uses_estimation_floor(),
        "loaded providers"
    );

    let use_colors = trustup24::output::should_use_colors();

    match command {
        Commands::Rank(args) => {
            let criteria = match build_criteria(&args) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let candidates = if args.strict {
                store.filter(&ProviderFilter {
                    category: criteria.category,
                    language: criteria.language.clone(),
                    ..ProviderFilter::default()
                })
            } else {
                store.list_all()
            };

            let limit = args
                .limit
                .or(config.default_limit)
                .unwrap_or(DEFAULT_MATCH_LIMIT);

            let matches = match engine.rank_matches(candidates, &criteria, limit) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            match args.format {
                OutputFormat::Table => {
                    println!("{}", trustup24::output::format_match_table(&matches, use_colors))
                }
                OutputFormat::Tsv => {
                    if !matches.is_empty() {
                        println!("{}", trustup24::output::format_match_tsv(&matches));
                    }
                }
                OutputFormat::Json => match serde_json::to_string_pretty(&matches) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize matches: {}", e);
                        std::process::exit(EXIT_WRITE);
                    }
                },
            }
        }
        Commands::List {
            category,
            language,
            verified,
            featured,
            search,
            min_trust,
        } => {
            let category = match parse_category(category.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let filter = ProviderFilter {
                category,
                language,
                verified_only: verified,
                featured_only: featured,
                search,
                min_trust_score: min_trust,
            };

            let mut scored = engine.score_providers(store.filter(&filter));
            scored.retain(|s| filter.admits_trust_score(s.trust_score));

            println!("{}", trustup24::output::format_provider_table(&scored, use_colors));
        }
        Commands::Categories => {
            println!(
                "{}",
                trustup24::output::format_category_counts(&store.category_counts(), use_colors)
            );
        }
        Commands::Explain { id } => {
            let Some(provider) = store.get_by_id(&id) else {
                eprintln!("Provider not found: {}", id);
                std::process::exit(EXIT_INPUT);
            };

            match engine.trust_breakdown(provider) {
                Ok(breakdown) => println!(
                    "{}",
                    trustup24::output::format_breakdown(provider, &breakdown, use_colors)
                ),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Score { output } => {
            let scored = engine.score_providers(store.list_all());
            let skipped = store.len() - scored.len();

            if let Err(e) = trustup24::provider::save_scored_providers(&output, &scored) {
                eprintln!("{:#}", e);
                std::process::exit(EXIT_WRITE);
            }

            println!(
                "Scored {} providers ({} skipped) -> {}",
                scored.len(),
                skipped,
                output.display()
            );
        }
        Commands::Validate => {
            let mut invalid = rejected.len();
            for record in &rejected {
                eprintln!("record {} ({}):", record.index, record.id.as_deref().unwrap_or("no id"));
                eprintln!("  - {}", record.error);
            }
            for provider in store.list_all() {
                if let Err(errors) = validate_provider(provider, engine.reference_year()) {
                    invalid += 1;
                    eprintln!("{}:", provider.id);
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                }
            }

            if invalid > 0 {
                eprintln!(
                    "{} of {} providers have problems",
                    invalid,
                    store.len() + rejected.len()
                );
                std::process::exit(EXIT_INPUT);
            }
            println!("All {} providers valid.", store.len());
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}
