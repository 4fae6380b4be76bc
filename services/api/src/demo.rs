use crate::infra::command_line_store;
use civic_reports::config::{AppConfig, ReportsConfig};
use civic_reports::error::AppError;
use civic_reports::reports::{
    run_listing, Category, CategoryFilter, ListingPage, ListingQuery, Report, ReportStats,
    ReportStatus, ReportSubmission, SortDirection, SortField, StatusFilter,
};
use clap::Args;
use serde::Serialize;
use std::io;

#[derive(Args, Debug)]
pub(crate) struct ReportListArgs {
    /// Category to list ("All", "Pothole", "Streetlight", "Garbage", "Water Leakage")
    #[arg(long, default_value = "All")]
    pub(crate) category: CategoryFilter,
    /// Case-insensitive text matched against titles and descriptions
    #[arg(long, short)]
    pub(crate) query: Option<String>,
    /// Status to keep ("All", "Pending", "In Progress", "Resolved")
    #[arg(long, default_value = "All")]
    pub(crate) status: StatusFilter,
    /// Sort key (created_at or status)
    #[arg(long, default_value = "created_at")]
    pub(crate) sort: SortField,
    /// Sort direction (asc or desc)
    #[arg(long, default_value = "desc")]
    pub(crate) direction: SortDirection,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Emit the page as CSV instead of plain text
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Title for the demo submission
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Start from an empty store instead of the sample reports
    #[arg(long)]
    pub(crate) skip_samples: bool,
}

pub(crate) async fn run_report_listing(args: ReportListArgs) -> Result<(), AppError> {
    let ReportListArgs {
        category,
        query,
        status,
        sort,
        direction,
        page,
        csv,
    } = args;

    let config = AppConfig::load()?;
    let store = command_line_store(config.reports);

    let snapshot = store.list_by_category(category).await?;
    let listing_query = ListingQuery::default()
        .with_search(query.unwrap_or_default())
        .with_status(status)
        .with_sort(sort, direction)
        .with_page(page);
    let listing = run_listing(&snapshot, &listing_query, store.page_size());

    if csv {
        write_csv(&listing.reports, io::stdout())?;
    } else {
        render_listing(&listing, &listing_query, category);
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        title,
        skip_samples,
    } = args;

    let config = AppConfig::load()?;
    let store = command_line_store(demo_config(config.reports, skip_samples));

    println!("Civic reports demo");
    let before = store.list_all().await?;
    render_stats(&ReportStats::from_reports(&before));

    let submission = ReportSubmission {
        title: title.unwrap_or_else(|| "Fallen tree blocking bike lane".to_string()),
        description: "A large branch came down overnight and blocks the northbound bike lane."
            .to_string(),
        category: Category::Garbage,
        image_url: None,
        latitude: 40.7142,
        longitude: -74.0071,
    };

    let created = store.create(submission).await?;
    println!(
        "\nSubmitted report {} -> status {}",
        created.id, created.status
    );

    let snapshot = store.list_all().await?;
    let newest = ListingQuery::default();
    render_listing(
        &run_listing(&snapshot, &newest, store.page_size()),
        &newest,
        CategoryFilter::All,
    );

    let pending = ListingQuery::default()
        .with_status(ReportStatus::Pending)
        .with_sort(SortField::CreatedAt, SortDirection::Asc);
    println!("\nPending reports, oldest first");
    render_listing(
        &run_listing(&snapshot, &pending, store.page_size()),
        &pending,
        CategoryFilter::All,
    );

    render_stats(&ReportStats::from_reports(&snapshot));
    Ok(())
}

fn demo_config(mut reports: ReportsConfig, skip_samples: bool) -> ReportsConfig {
    reports.seed_samples = reports.seed_samples && !skip_samples;
    reports
}

pub(crate) fn render_listing(page: &ListingPage, query: &ListingQuery, category: CategoryFilter) {
    println!(
        "\nCommunity reports ({} | sorted by {} {})",
        category.label(),
        query.sort.field,
        query.sort.direction
    );

    if let Some(state) = page.empty_state(query, category) {
        println!("{}", state.message(category));
        return;
    }

    println!(
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, page.total_items
    );
    if page.reports.is_empty() {
        println!("- no reports on this page");
        return;
    }
    for report in &page.reports {
        let photo = report
            .image_url
            .as_ref()
            .map(|image| format!(" | {} photo", image.kind().label()))
            .unwrap_or_default();
        println!(
            "- [{}] {} | {} | {:.4}, {:.4} | reported {}{} | id {}",
            report.status,
            report.title,
            report.category,
            report.latitude,
            report.longitude,
            report.created_at.date_naive(),
            photo,
            report.id
        );
    }
}

fn render_stats(stats: &ReportStats) {
    println!("\nReport statistics");
    let by_status = ReportStatus::ALL
        .iter()
        .map(|status| format!("{} {}", stats.count_for(*status), status.label()))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("- {} total | {}", stats.total, by_status);
    for (category, count) in &stats.by_category {
        println!("  - {}: {}", category, count);
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    title: &'a str,
    category: &'static str,
    status: &'static str,
    created_at: String,
    latitude: f64,
    longitude: f64,
    image_kind: Option<&'static str>,
    image_url: Option<&'a str>,
}

impl<'a> From<&'a Report> for ReportRow<'a> {
    fn from(report: &'a Report) -> Self {
        Self {
            id: &report.id.0,
            title: &report.title,
            category: report.category.label(),
            status: report.status.label(),
            created_at: report.created_at.to_rfc3339(),
            latitude: report.latitude,
            longitude: report.longitude,
            image_kind: report.image_url.as_ref().map(|image| image.kind().label()),
            image_url: report.image_url.as_ref().map(|image| image.as_str()),
        }
    }
}

pub(crate) fn write_csv<W: io::Write>(reports: &[Report], sink: W) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    for report in reports {
        writer
            .serialize(ReportRow::from(report))
            .map_err(io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_reports::reports::{sample_reports, ImageReference, ReportStoreError};

    #[test]
    fn csv_export_has_header_and_one_row_per_report() {
        let reports = sample_reports();
        let mut buffer = Vec::new();
        write_csv(&reports[..2], &mut buffer).expect("csv writes");

        let text = String::from_utf8(buffer).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,title,category,status,created_at"));
        assert!(lines[2].contains("In Progress"));
    }

    #[tokio::test]
    async fn demo_runs_against_an_empty_store() {
        let args = DemoArgs {
            title: Some("Demo pothole".to_string()),
            skip_samples: true,
        };
        run_demo(args).await.expect("demo completes");
    }

    #[tokio::test]
    async fn demo_surfaces_rejected_submissions() {
        let args = DemoArgs {
            title: Some("   ".to_string()),
            skip_samples: true,
        };
        let error = run_demo(args).await.expect_err("blank title is rejected");
        assert!(matches!(
            error,
            AppError::Reports(ReportStoreError::Validation(_))
        ));
    }

    #[test]
    fn demo_keeps_configured_page_size() {
        let reports = ReportsConfig {
            page_size: 3,
            ..ReportsConfig::default()
        };
        let config = demo_config(reports, true);
        assert_eq!(config.page_size, 3);
        assert!(!config.seed_samples);

        let seeded = demo_config(ReportsConfig::default(), false);
        assert!(seeded.seed_samples);
    }

    #[test]
    fn csv_export_names_the_image_kind() {
        let mut reports = sample_reports();
        reports.truncate(1);
        reports[0].image_url = Some(
            ImageReference::parse("https://images.example.org/pothole.jpg").expect("remote url"),
        );
        let mut buffer = Vec::new();
        write_csv(&reports, &mut buffer).expect("csv writes");

        let text = String::from_utf8(buffer).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("image_kind,image_url"));
        assert!(lines[1].ends_with("remote,https://images.example.org/pothole.jpg"));
    }
}
