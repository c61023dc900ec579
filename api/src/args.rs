use clap::{Parser, ValueEnum, builder::NonEmptyStringValueParser};
use nutrigoal_core::domain::{
    common::{DataStoreConfig, NutrigoalConfig, RecalculationConfig, SupabaseConfig},
    daily_goals::value_objects::DayBoundary,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrigoal-api", version, about = "Recalculates daily nutrition goal progress")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub data_store: DataStoreArgs,

    #[command(flatten)]
    pub recalculation: RecalculationArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(
        long = "server-root-path",
        env = "SERVER_ROOT_PATH",
        default_value = "/functions/v1"
    )]
    pub root_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataStoreKind {
    Supabase,
    Memory,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DataStoreArgs {
    #[arg(
        long = "data-store",
        env = "DATA_STORE",
        value_enum,
        default_value_t = DataStoreKind::Supabase
    )]
    pub kind: DataStoreKind,

    #[arg(
        long = "supabase-url",
        env = "SUPABASE_URL",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub supabase_url: Option<String>,

    #[arg(
        long = "supabase-service-role-key",
        env = "SUPABASE_SERVICE_ROLE_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub supabase_service_role_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayBoundaryArg {
    /// Window ends at 23:59:59, exclusive
    LastSecondExclusive,
    /// Window ends at the next day's 00:00:00, exclusive
    NextMidnight,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RecalculationArgs {
    #[arg(
        long = "day-boundary",
        env = "DAY_BOUNDARY",
        value_enum,
        default_value_t = DayBoundaryArg::LastSecondExclusive
    )]
    pub day_boundary: DayBoundaryArg,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<DayBoundaryArg> for DayBoundary {
    fn from(arg: DayBoundaryArg) -> Self {
        match arg {
            DayBoundaryArg::LastSecondExclusive => DayBoundary::LastSecondExclusive,
            DayBoundaryArg::NextMidnight => DayBoundary::NextMidnight,
        }
    }
}

impl TryFrom<Args> for NutrigoalConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let data_store = match args.data_store.kind {
            DataStoreKind::Supabase => {
                let url = args.data_store.supabase_url.ok_or_else(|| {
                    anyhow::anyhow!("SUPABASE_URL is required when using the supabase data store")
                })?;
                let service_role_key =
                    args.data_store.supabase_service_role_key.ok_or_else(|| {
                        anyhow::anyhow!(
                            "SUPABASE_SERVICE_ROLE_KEY is required when using the supabase data store"
                        )
                    })?;

                DataStoreConfig::Supabase(SupabaseConfig {
                    url,
                    service_role_key,
                })
            }
            DataStoreKind::Memory => DataStoreConfig::InMemory,
        };

        Ok(NutrigoalConfig {
            data_store,
            recalculation: RecalculationConfig {
                day_boundary: args.recalculation.day_boundary.into(),
                ..Default::default()
            },
        })
    }
}
