//! Load generator for `/analyze`: fires a batch of requests sequentially or
//! through a bounded worker pool and summarises latencies.

use crate::api::PaletteApi;
use crate::api::models::AnalysisMethod;
use anyhow::Context;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

const SAMPLE_TEXTS: &[&str] = &[
    "Me siento muy feliz hoy",
    "Estoy un poco triste por la situación actual",
    "Siento una mezcla de nostalgia y esperanza por el futuro",
    "I'm feeling anxious about tomorrow's presentation",
    "Je me sens très optimiste aujourd'hui",
    "Estoy emocionado por este nuevo proyecto",
    "Me encuentro melancólico esta tarde de lluvia",
    "I feel incredibly energetic and motivated right now",
    "Tengo sentimientos encontrados sobre esta decisión importante",
    "Me siento en paz y tranquilo después de meditar",
    "I'm overwhelmed with joy seeing my family again",
    "Me encuentro frustrado por los obstáculos constantes",
    "I feel grateful for all the opportunities I've been given",
    "Estoy preocupado por el futuro pero mantengo la esperanza",
    "I'm feeling contemplative about life's big questions",
];

/// Text lengths exercised by the volume phase.
const MEDIUM_TEXT: &str = "Me siento muy feliz y emocionado por este nuevo día";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Concurrent { workers: usize },
}

#[derive(Debug, Clone)]
pub struct Sample {
    pub ok: bool,
    pub latency: Duration,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mode: String,
    pub total_requests: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub latency: Option<LatencyStats>,
    pub errors: Vec<String>,
}

/// Everything one load run produced, as written by `--out`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summaries: Vec<Summary>,
    pub recommendations: Vec<String>,
}

/// Seconds, over successful requests only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub std_dev: f64,
}

/// Refuses to load a service that is not up.
pub async fn ensure_available(api: &dyn PaletteApi) -> anyhow::Result<()> {
    let health = api.health().await.context("palette service unreachable")?;
    if !health.is_healthy() {
        anyhow::bail!("palette service reports status {:?}", health.status);
    }
    Ok(())
}

/// Short, medium, long and very long inputs.
pub fn volume_texts() -> [(&'static str, String); 4] {
    [
        ("short", "Feliz".to_string()),
        ("medium", MEDIUM_TEXT.to_string()),
        ("long", SAMPLE_TEXTS[..5].join(" ")),
        ("very long", SAMPLE_TEXTS[..10].join(" ")),
    ]
}

fn plan(count: usize) -> Vec<(&'static str, AnalysisMethod)> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let text = SAMPLE_TEXTS.choose(&mut rng).copied().unwrap_or(SAMPLE_TEXTS[0]);
            let method = AnalysisMethod::ALL
                .choose(&mut rng)
                .copied()
                .unwrap_or_default();
            (text, method)
        })
        .collect()
}

async fn timed(api: &dyn PaletteApi, text: &str, method: AnalysisMethod) -> Sample {
    let started = Instant::now();
    let res = api.analyze(text, method).await;
    let latency = started.elapsed();
    match res {
        Ok(_) => Sample {
            ok: true,
            latency,
            error: None,
        },
        Err(e) => Sample {
            ok: false,
            latency,
            error: Some(format!("{e:#}")),
        },
    }
}

pub async fn run(api: Arc<dyn PaletteApi>, count: usize, mode: Mode) -> Vec<Sample> {
    let jobs = plan(count);
    match mode {
        Mode::Sequential => {
            let mut samples = Vec::with_capacity(count);
            for (i, (text, method)) in jobs.into_iter().enumerate() {
                samples.push(timed(api.as_ref(), text, method).await);
                if (i + 1) % 10 == 0 {
                    tracing::info!("completed {}/{count}", i + 1);
                }
            }
            samples
        }
        Mode::Concurrent { workers } => {
            let permits = Arc::new(Semaphore::new(workers.max(1)));
            let mut set = JoinSet::new();
            for (text, method) in jobs {
                let api = api.clone();
                let permits = permits.clone();
                set.spawn(async move {
                    let _permit = permits.acquire_owned().await;
                    timed(api.as_ref(), text, method).await
                });
            }
            let mut samples = Vec::with_capacity(count);
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(s) => samples.push(s),
                    Err(e) => samples.push(Sample {
                        ok: false,
                        latency: Duration::ZERO,
                        error: Some(format!("worker panicked: {e}")),
                    }),
                }
            }
            samples
        }
    }
}

/// Runs `per_length` sequential hybrid requests for each text length and
/// summarises each length on its own.
pub async fn run_volume(api: &dyn PaletteApi, per_length: usize) -> Vec<Summary> {
    let mut summaries = Vec::new();
    for (label, text) in volume_texts() {
        tracing::info!(label, chars = text.chars().count(), "volume phase");
        let mut samples = Vec::with_capacity(per_length);
        for _ in 0..per_length {
            samples.push(timed(api, &text, AnalysisMethod::Hybrid).await);
        }
        let label = format!("volume {label} ({} chars)", text.chars().count());
        summaries.push(summarize_as(label, &samples));
    }
    summaries
}

pub fn summarize(mode: Mode, samples: &[Sample]) -> Summary {
    let label = match mode {
        Mode::Sequential => "sequential".to_string(),
        Mode::Concurrent { workers } => format!("concurrent ({workers} workers)"),
    };
    summarize_as(label, samples)
}

fn summarize_as(mode: String, samples: &[Sample]) -> Summary {
    let succeeded = samples.iter().filter(|s| s.ok).count();
    let total = samples.len();
    let mut times: Vec<f64> = samples
        .iter()
        .filter(|s| s.ok)
        .map(|s| s.latency.as_secs_f64())
        .collect();
    times.sort_by(|a, b| a.total_cmp(b));

    let mut errors: Vec<String> = samples.iter().filter_map(|s| s.error.clone()).collect();
    errors.sort();
    errors.dedup();

    Summary {
        mode,
        total_requests: total,
        succeeded,
        failed: total - succeeded,
        success_rate: if total == 0 {
            0.0
        } else {
            succeeded as f64 / total as f64 * 100.0
        },
        latency: latency_stats(&times),
        errors,
    }
}

/// `sorted` must be ascending.
fn latency_stats(sorted: &[f64]) -> Option<LatencyStats> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    let p95 = if n > 1 {
        sorted[((n as f64 * 0.95) as usize).min(n - 1)]
    } else {
        sorted[0]
    };
    let std_dev = if n > 1 {
        let var = sorted.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    Some(LatencyStats {
        mean,
        median,
        min: sorted[0],
        max: sorted[n - 1],
        p95,
        std_dev,
    })
}

/// Advice from the mean latency and mean success rate across all runs.
pub fn recommendations(summaries: &[Summary]) -> Vec<String> {
    let means: Vec<f64> = summaries
        .iter()
        .filter_map(|s| s.latency.as_ref().map(|l| l.mean))
        .collect();
    let rates: Vec<f64> = summaries
        .iter()
        .filter(|s| s.total_requests > 0)
        .map(|s| s.success_rate)
        .collect();

    let mut out = Vec::new();
    if !means.is_empty() {
        let mean = means.iter().sum::<f64>() / means.len() as f64;
        if mean > 3.0 {
            out.push("Average latency is high; profile the analysis pipeline".to_string());
        } else if mean < 1.0 {
            out.push("Latency is excellent".to_string());
        }
    }
    if !rates.is_empty() {
        let rate = rates.iter().sum::<f64>() / rates.len() as f64;
        if rate < 95.0 {
            out.push("Failure rate is high; review service error handling".to_string());
        } else if rate >= 99.0 {
            out.push("Service is stable".to_string());
        }
    }
    if out.is_empty() {
        out.push("Service is within normal parameters".to_string());
    }
    out
}

pub fn print_summary(summary: &Summary) {
    println!("Results ({}):", summary.mode);
    println!("  total requests: {}", summary.total_requests);
    println!("  succeeded:      {}", summary.succeeded);
    println!("  failed:         {}", summary.failed);
    println!("  success rate:   {:.1}%", summary.success_rate);
    match &summary.latency {
        Some(l) => {
            println!("  mean:           {:.3}s", l.mean);
            println!("  median:         {:.3}s", l.median);
            println!("  p95:            {:.3}s", l.p95);
            println!("  range:          {:.3}s - {:.3}s", l.min, l.max);
            println!("  std dev:        {:.3}s", l.std_dev);
        }
        None => println!("  every request failed"),
    }
    for e in summary.errors.iter().take(5) {
        println!("  error: {e}");
    }
}

pub fn print_recommendations(recommendations: &[String]) {
    println!("Recommendations:");
    for r in recommendations {
        println!("  - {r}");
    }
}

pub fn write_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;

    fn ok(secs: f64) -> Sample {
        Sample {
            ok: true,
            latency: Duration::from_secs_f64(secs),
            error: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_stats_formulas() {
        let samples = vec![ok(0.4), ok(0.1), ok(0.3), ok(0.2)];
        let s = summarize(Mode::Sequential, &samples);
        let l = s.latency.unwrap();
        assert!(close(l.mean, 0.25));
        assert!(close(l.median, 0.25));
        assert!(close(l.min, 0.1));
        assert!(close(l.max, 0.4));
        // floor(4 * 0.95) = 3
        assert!(close(l.p95, 0.4));
        assert!(close(l.std_dev, (0.05f64 / 3.0).sqrt()));
        assert!(close(s.success_rate, 100.0));
    }

    #[test]
    fn test_single_sample() {
        let l = summarize(Mode::Sequential, &[ok(0.5)]).latency.unwrap();
        assert!(close(l.p95, 0.5));
        assert_eq!(l.std_dev, 0.0);
    }

    #[test]
    fn test_all_failed() {
        let failed = Sample {
            ok: false,
            latency: Duration::from_millis(3),
            error: Some("boom".into()),
        };
        let s = summarize(Mode::Concurrent { workers: 2 }, &[failed.clone(), failed]);
        assert_eq!(s.failed, 2);
        assert_eq!(s.success_rate, 0.0);
        assert!(s.latency.is_none());
        assert_eq!(s.errors, vec!["boom"]);
        assert_eq!(s.mode, "concurrent (2 workers)");
    }

    #[tokio::test]
    async fn test_concurrent_run_issues_every_request() {
        let api = Arc::new(FakeApi::new());
        let samples = run(api.clone(), 12, Mode::Concurrent { workers: 3 }).await;
        assert_eq!(samples.len(), 12);
        assert!(samples.iter().all(|s| s.ok));
        assert_eq!(api.count("analyze"), 12);
    }

    #[tokio::test]
    async fn test_refuses_unhealthy_service() {
        let mut fake = FakeApi::new();
        fake.healthy = false;
        let err = ensure_available(&fake).await.unwrap_err();
        assert!(format!("{err:#}").contains("degraded"));
        assert!(ensure_available(&FakeApi::new()).await.is_ok());
        assert_eq!(fake.count("analyze"), 0);
    }

    #[tokio::test]
    async fn test_volume_covers_each_length() {
        let api = FakeApi::new();
        let summaries = run_volume(&api, 3).await;
        assert_eq!(summaries.len(), 4);
        assert!(summaries.iter().all(|s| s.total_requests == 3 && s.succeeded == 3));
        assert_eq!(summaries[0].mode, "volume short (5 chars)");
        assert!(summaries[3].mode.starts_with("volume very long"));
        assert_eq!(api.count("analyze hybrid Feliz"), 3);
        assert_eq!(api.count("analyze hybrid"), 12);
    }

    #[test]
    fn test_volume_texts_grow() {
        let lens: Vec<usize> = volume_texts().iter().map(|(_, t)| t.len()).collect();
        assert!(lens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_recommendations() {
        let fast = summarize(Mode::Sequential, &[ok(0.2), ok(0.4)]);
        assert_eq!(
            recommendations(&[fast]),
            vec!["Latency is excellent", "Service is stable"]
        );

        let failed = Sample {
            ok: false,
            latency: Duration::ZERO,
            error: Some("down".into()),
        };
        let slow = summarize(Mode::Sequential, &[ok(4.0), failed]);
        assert_eq!(
            recommendations(&[slow]),
            vec![
                "Average latency is high; profile the analysis pipeline",
                "Failure rate is high; review service error handling",
            ]
        );

        let middling = summarize(Mode::Sequential, &[ok(2.0)]);
        let mut fail_one = vec![ok(2.0); 96];
        fail_one.extend(std::iter::repeat_n(
            Sample {
                ok: false,
                latency: Duration::ZERO,
                error: None,
            },
            4,
        ));
        let mixed = summarize(Mode::Sequential, &fail_one);
        assert_eq!(
            recommendations(&[middling, mixed]),
            vec!["Service is within normal parameters"]
        );
        assert_eq!(recommendations(&[]), vec!["Service is within normal parameters"]);
    }

    #[test]
    fn test_report_lists_summaries_and_advice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("load.json");
        let summaries = vec![summarize(Mode::Sequential, &[ok(0.5)])];
        let report = Report {
            recommendations: recommendations(&summaries),
            summaries,
        };
        write_report(&report, &path).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["summaries"][0]["mode"], "sequential");
        assert_eq!(raw["recommendations"][0], "Latency is excellent");
    }

    #[tokio::test]
    async fn test_sequential_run_counts_failures() {
        let mut fake = FakeApi::new();
        fake.fail_analyze = true;
        let api = Arc::new(fake);
        let samples = run(api.clone(), 4, Mode::Sequential).await;
        let s = summarize(Mode::Sequential, &samples);
        assert_eq!(s.failed, 4);
        assert_eq!(api.count("analyze"), 4);
    }
}
