/// Key for the transaction-scoped advisory lock that serializes schema bootstrap
/// across processes starting at the same time.
pub(crate) const SCHEMA_LOCK_KEY: i64 = 0x6d62_6a6f_6273;

pub(crate) const CREATE_JOBS_TABLE: &str = "CREATE TABLE IF NOT EXISTS jobs (
    id BIGSERIAL PRIMARY KEY,
    prompt TEXT NOT NULL,
    task TEXT NOT NULL,
    model_id TEXT NOT NULL,
    output TEXT NOT NULL,
    latency DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
)";
