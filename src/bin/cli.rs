use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use drivedesk::cli::seed_licence_categories;
use drivedesk::logging::init_tracing;
use drivedesk::modules::{
    CustomerLicenceService, CustomerService, LicenceCategoryService, PgRequirementSource,
    ensure_eligible,
};
use drivedesk::state::AppState;
use drivedesk_config::LogConfig;
use drivedesk_core::errors::AppError;
use drivedesk_core::pagination::PageParams;
use drivedesk_models::{CustomerId, GrantLicence, LicenceCategoryId};

#[derive(Parser)]
#[command(name = "drivedesk-cli")]
#[command(about = "DriveDesk CLI - Administrative tools for DriveDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Insert the standard licence categories and their prerequisites
    SeedCategories,
    /// Print one page of licence categories as JSON
    ListCategories {
        /// Page number (1-indexed)
        #[arg(long, allow_negative_numbers = true)]
        page_index: Option<i64>,

        /// Items per page (defaults to DEFAULT_PAGE_SIZE)
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
    },
    /// Check whether a customer meets the prerequisites of a licence category
    CheckEligibility {
        #[arg(long)]
        customer: CustomerId,

        #[arg(long)]
        category: LicenceCategoryId,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Record a licence category held by a customer
    GrantLicence {
        #[arg(long)]
        customer: CustomerId,

        #[arg(long)]
        category: LicenceCategoryId,

        /// Date the category was obtained (YYYY-MM-DD)
        #[arg(long)]
        acquired_on: NaiveDate,

        /// Last day the category is valid (YYYY-MM-DD)
        #[arg(long)]
        expires_on: Option<NaiveDate>,

        /// Reference date for the checks (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(&LogConfig::from_env()) {
        eprintln!("⚠️  Failed to initialize logging: {}", e);
    }

    let state = match AppState::from_env().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("\n❌ Failed to connect to database: {}", e.message());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&state).await,
        Commands::SeedCategories => handle_seed_categories(&state).await,
        Commands::ListCategories {
            page_index,
            page_size,
        } => handle_list_categories(&state, PageParams { page_index, page_size }).await,
        Commands::CheckEligibility {
            customer,
            category,
            as_of,
        } => handle_check_eligibility(&state, customer, category, as_of.unwrap_or_else(today)).await,
        Commands::GrantLicence {
            customer,
            category,
            acquired_on,
            expires_on,
            as_of,
        } => {
            let grant = GrantLicence {
                licence_category_id: category,
                acquired_on,
                expires_on,
            };
            handle_grant_licence(&state, customer, grant, as_of.unwrap_or_else(today)).await
        }
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error ({}): {}", e.status.as_u16(), e.message());
        std::process::exit(1);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn handle_migrate(state: &AppState) -> Result<(), AppError> {
    drivedesk_db::run_migrations(&state.db).await?;
    println!("\n✅ Migrations applied");
    Ok(())
}

async fn handle_seed_categories(state: &AppState) -> Result<(), AppError> {
    let summary = seed_licence_categories(&state.db).await?;

    println!("\n✅ Licence categories seeded");
    println!("   Categories inserted: {}", summary.categories_inserted);
    println!("   Prerequisites inserted: {}", summary.prerequisites_inserted);
    Ok(())
}

async fn handle_list_categories(state: &AppState, params: PageParams) -> Result<(), AppError> {
    let page = LicenceCategoryService::list(&state.db, &params, &state.pagination_config).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

async fn handle_check_eligibility(
    state: &AppState,
    customer_id: CustomerId,
    category_id: LicenceCategoryId,
    as_of: NaiveDate,
) -> Result<(), AppError> {
    let customer = CustomerService::get(&state.db, customer_id).await?;
    let category = LicenceCategoryService::get(&state.db, category_id).await?;
    let possessions =
        CustomerLicenceService::active_possessions(&state.db, customer_id, as_of).await?;

    let outcome = ensure_eligible(
        &PgRequirementSource::new(&state.db),
        &possessions,
        category.id,
        as_of,
    )
    .await;

    match outcome {
        Ok(()) => println!(
            "\n✅ {} meets the prerequisites of {} as of {}",
            customer.full_name(),
            category.code,
            as_of
        ),
        Err(e) if e.status.as_u16() == 409 => {
            println!(
                "\n❌ {} does not meet the prerequisites of {} as of {}",
                customer.full_name(),
                category.code,
                as_of
            );
            println!("   {}", e.message());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

async fn handle_grant_licence(
    state: &AppState,
    customer_id: CustomerId,
    grant: GrantLicence,
    as_of: NaiveDate,
) -> Result<(), AppError> {
    let licence = CustomerLicenceService::grant(&state.db, customer_id, grant, as_of).await?;

    println!("\n✅ Licence category granted");
    println!("   {}", serde_json::to_string_pretty(&licence)?);
    Ok(())
}
