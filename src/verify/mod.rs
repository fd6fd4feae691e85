//! Operator smoke test against a running service.
//!
//! Six independent checks run in order. A failing check never stops the
//! next one and the outcome never changes the process exit code.

use crate::api::models::{AnalysisMethod, PALETTE_SIZE};
use crate::api::PaletteApi;
use crate::storage::PaletteDatabase;
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};

pub const SAMPLE_TEXT: &str = "Test de verificación";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass(String),
    Fail(String),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: &'static str,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct LocalPaths {
    pub database: PathBuf,
    pub test_file: PathBuf,
}

pub async fn run_checklist(api: &dyn PaletteApi, paths: &LocalPaths) -> Vec<CheckReport> {
    vec![
        CheckReport {
            name: "Health endpoint",
            outcome: check_health(api).await,
        },
        CheckReport {
            name: "Create palette",
            outcome: check_create(api).await,
        },
        CheckReport {
            name: "List gallery",
            outcome: check_list(api).await,
        },
        CheckReport {
            name: "Delete palette",
            outcome: check_delete(api).await,
        },
        CheckReport {
            name: "Database file",
            outcome: check_database(&paths.database),
        },
        CheckReport {
            name: "Test file",
            outcome: check_test_file(&paths.test_file),
        },
    ]
}

async fn check_health(api: &dyn PaletteApi) -> Outcome {
    match api.health().await {
        Ok(h) if h.is_healthy() => Outcome::Pass("status: healthy".into()),
        Ok(h) => Outcome::Fail(format!("status: {}", h.status)),
        Err(e) => Outcome::Fail(format!("{e:#}")),
    }
}

async fn check_create(api: &dyn PaletteApi) -> Outcome {
    match api.analyze(SAMPLE_TEXT, AnalysisMethod::Hybrid).await {
        Ok(a) if a.colors.len() == PALETTE_SIZE => {
            Outcome::Pass(format!("{} colours: {}", a.colors.len(), a.colors.join(", ")))
        }
        Ok(a) => Outcome::Fail(format!(
            "expected {PALETTE_SIZE} colours, got {}",
            a.colors.len()
        )),
        Err(e) => Outcome::Fail(format!("{e:#}")),
    }
}

async fn check_list(api: &dyn PaletteApi) -> Outcome {
    match api.gallery(None).await {
        Ok(listing) => Outcome::Pass(format!("{} palettes reported", listing.total)),
        Err(e) => Outcome::Fail(format!("{e:#}")),
    }
}

async fn check_delete(api: &dyn PaletteApi) -> Outcome {
    let listing = match api.gallery(None).await {
        Ok(l) => l,
        Err(e) => return Outcome::Fail(format!("{e:#}")),
    };
    let Some(id) = listing.first_id().cloned() else {
        return Outcome::Notice("gallery is empty, nothing to delete".into());
    };
    match api.delete_palette(&id).await {
        Ok(()) => Outcome::Pass(format!("deleted palette {id}")),
        Err(e) => Outcome::Fail(format!("{e:#}")),
    }
}

fn check_database(path: &Path) -> Outcome {
    let Ok(meta) = std::fs::metadata(path) else {
        return Outcome::Fail(format!("{} not found", path.display()));
    };
    if !meta.is_file() {
        return Outcome::Fail(format!("{} is not a file", path.display()));
    }
    let kb = meta.len() as f64 / 1024.0;
    let rows = PaletteDatabase::open(path).and_then(|p| p.palette_count());
    match rows {
        Ok(n) => Outcome::Pass(format!("{} ({kb:.2} KB, {n} rows)", path.display())),
        Err(e) => {
            tracing::debug!("database check failed: {e:#}");
            Outcome::Pass(format!("{} ({kb:.2} KB)", path.display()))
        }
    }
}

fn check_test_file(path: &Path) -> Outcome {
    if path.is_file() {
        Outcome::Pass(format!("{} present", path.display()))
    } else {
        Outcome::Fail(format!("{} not found", path.display()))
    }
}

pub fn print_report(base_url: &str, reports: &[CheckReport]) {
    println!("{}", format!("Verifying palette service at {base_url}").bold());
    println!();
    for (i, r) in reports.iter().enumerate() {
        let (tag, detail) = match &r.outcome {
            Outcome::Pass(d) => ("PASS".green().bold(), d),
            Outcome::Fail(d) => ("FAIL".red().bold(), d),
            Outcome::Notice(d) => ("NOTE".yellow().bold(), d),
        };
        println!("{}. [{}] {:<16} {}", i + 1, tag, r.name, detail.as_str().dark_grey());
    }
    let passed = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Pass(_)))
        .count();
    println!();
    println!("{passed}/{} checks passed", reports.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> LocalPaths {
        LocalPaths {
            database: dir.path().join("palettes.db"),
            test_file: dir.path().join("test_unit.py"),
        }
    }

    #[tokio::test]
    async fn test_all_pass() {
        let dir = TempDir::new().unwrap();
        let p = paths(&dir);
        std::fs::write(&p.database, vec![0u8; 2048]).unwrap();
        std::fs::write(&p.test_file, "def test(): pass").unwrap();
        let api = FakeApi::new().with_entries(&[1, 2]);

        let reports = run_checklist(&api, &p).await;
        assert_eq!(reports.len(), 6);
        for r in &reports {
            assert!(matches!(r.outcome, Outcome::Pass(_)), "{r:?}");
        }
        assert!(matches!(&reports[4].outcome, Outcome::Pass(d) if d.contains("2.00 KB")));
        // create ran before list, so the newest palette is the one deleted
        assert_eq!(
            api.calls(),
            vec![
                "health",
                "analyze hybrid Test de verificación",
                "gallery None",
                "gallery None",
                "delete 3",
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_checks() {
        let dir = TempDir::new().unwrap();
        let mut api = FakeApi::new();
        api.healthy = false;
        api.fail_analyze = true;
        api.fail_gallery = true;

        let reports = run_checklist(&api, &paths(&dir)).await;
        assert_eq!(reports.len(), 6);
        assert!(reports.iter().all(|r| matches!(r.outcome, Outcome::Fail(_))));
        assert_eq!(api.count("gallery"), 2);
        assert_eq!(api.count("delete"), 0);
    }

    #[tokio::test]
    async fn test_empty_gallery_is_notice() {
        let dir = TempDir::new().unwrap();
        let mut api = FakeApi::new();
        api.fail_analyze = true;

        let reports = run_checklist(&api, &paths(&dir)).await;
        assert_eq!(
            reports[3].outcome,
            Outcome::Notice("gallery is empty, nothing to delete".into())
        );
        assert_eq!(api.count("delete"), 0);
    }

    #[tokio::test]
    async fn test_directory_is_not_a_database() {
        let dir = TempDir::new().unwrap();
        let p = paths(&dir);
        std::fs::create_dir(&p.database).unwrap();
        let api = FakeApi::new();
        let reports = run_checklist(&api, &p).await;
        assert!(
            matches!(&reports[4].outcome, Outcome::Fail(d) if d.ends_with("is not a file")),
            "{:?}",
            reports[4]
        );
    }

    #[tokio::test]
    async fn test_wrong_color_count_fails_create() {
        let dir = TempDir::new().unwrap();
        let mut api = FakeApi::new();
        api.colors.truncate(3);
        let reports = run_checklist(&api, &paths(&dir)).await;
        assert_eq!(
            reports[1].outcome,
            Outcome::Fail("expected 5 colours, got 3".into())
        );
    }
}
