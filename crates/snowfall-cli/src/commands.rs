use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use core::time::Duration;
use serde_json::json;
use snowfall::{GeneratorConfig, LockSnowflakeGenerator, Snowflake, TimeSource};
use std::{io::Write, sync::Arc, thread};

/// Generates `count` IDs across `threads` threads sharing one generator and
/// writes them in ascending order.
pub fn generate<T>(
    config: GeneratorConfig,
    time: T,
    count: usize,
    threads: usize,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    T: TimeSource + Send + Sync,
{
    let generator = Arc::new(LockSnowflakeGenerator::new(config, time)?);

    if count > Snowflake::MAX_SEQUENCE as usize + 1 {
        tracing::warn!(
            count,
            "more than {} IDs requested; IDs repeat if the sequence wraps within one millisecond",
            Snowflake::MAX_SEQUENCE + 1
        );
    }

    let threads = threads.clamp(1, count.max(1));
    let per_thread = count / threads;
    let remainder = count % threads;

    let mut ids = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let generator = Arc::clone(&generator);
                let n = per_thread + usize::from(i < remainder);
                s.spawn(move || (0..n).map(|_| generator.generate()).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| anyhow::anyhow!("generator thread panicked"))?
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    ids.sort_unstable();

    tracing::debug!(count = ids.len(), threads, "generated ids");

    if json {
        serde_json::to_writer(&mut *out, &ids)?;
        writeln!(out)?;
    } else {
        for id in &ids {
            writeln!(out, "{id}")?;
        }
    }
    Ok(())
}

/// Decodes each ID and writes its fields.
pub fn inspect(
    epoch: Duration,
    ids: &[String],
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let ids = ids
        .iter()
        .map(|s| Snowflake::parse(s).with_context(|| format!("cannot inspect {s:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        let rows: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "timestamp": id.timestamp(),
                    "unix_ms": id.unix_millis(epoch),
                    "created_at": created_at(*id, epoch),
                    "worker_id": id.worker_id(),
                    "process_id": id.process_id(),
                    "sequence": id.sequence(),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
    } else {
        for id in ids {
            writeln!(
                out,
                "{id}\tcreated_at={} timestamp={} worker_id={} process_id={} sequence={}",
                created_at(id, epoch).unwrap_or_else(|| format!("{}ms", id.unix_millis(epoch))),
                id.timestamp(),
                id.worker_id(),
                id.process_id(),
                id.sequence(),
            )?;
        }
    }
    Ok(())
}

/// RFC 3339 creation time, or `None` past the range chrono can represent.
fn created_at(id: Snowflake, epoch: Duration) -> Option<String> {
    let millis = i64::try_from(id.unix_millis(epoch)).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}
