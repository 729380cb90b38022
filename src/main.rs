use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::config::Config;
use fittrack::handlers::{exercises, nutrition, schedule, settings, stats, templates, workouts};
use fittrack::repositories::{
    ExerciseRepository, NutritionRepository, ScheduleRepository, SettingsRepository,
    WorkoutRepository,
};
use fittrack::store::KvStore;
use fittrack::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // Create repositories over the shared key-value store
    let store = KvStore::new(pool);
    let exercise_repo = ExerciseRepository::new(store.clone());
    let workout_repo = WorkoutRepository::new(store.clone());
    let schedule_repo = ScheduleRepository::new(store.clone());
    let nutrition_repo = NutritionRepository::new(store.clone());
    let settings_repo = SettingsRepository::new(store);

    // Create handler states
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
        schedule_repo: schedule_repo.clone(),
    };
    let schedule_state = schedule::ScheduleHandlerState {
        schedule_repo: schedule_repo.clone(),
        exercise_repo: exercise_repo.clone(),
        workout_repo: workout_repo.clone(),
    };
    let templates_state = templates::TemplatesState {
        schedule_repo: schedule_repo.clone(),
    };
    let nutrition_state = nutrition::NutritionState {
        nutrition_repo: nutrition_repo.clone(),
    };
    let stats_state = stats::StatsState {
        nutrition_repo,
        workout_repo,
        settings_repo: settings_repo.clone(),
    };
    let settings_state = settings::SettingsState { settings_repo };

    // Build router
    let app = routes::create_router(
        exercises_state,
        workouts_state,
        schedule_state,
        templates_state,
        nutrition_state,
        stats_state,
        settings_state,
    );

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
