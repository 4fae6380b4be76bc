use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{Category, ImageReference, Report, ReportId, ReportStatus};

struct SampleReport {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    image_url: &'static str,
    latitude: f64,
    longitude: f64,
    reported_on: (i32, u32, u32),
    status: ReportStatus,
}

const SAMPLES: [SampleReport; 4] = [
    SampleReport {
        id: "1",
        title: "Large pothole on Main Street",
        description: "There is a large pothole near the intersection of Main Street and 5th Avenue. It has caused damage to multiple vehicles.",
        category: Category::Pothole,
        image_url: "https://images.unsplash.com/photo-1482881497185-d4a9ddbe4151",
        latitude: 40.7128,
        longitude: -74.0060,
        reported_on: (2025, 4, 20),
        status: ReportStatus::Pending,
    },
    SampleReport {
        id: "2",
        title: "Broken streetlight outside library",
        description: "The streetlight outside the public library has been flickering for weeks and now completely stopped working. This area is very dark at night.",
        category: Category::Streetlight,
        image_url: "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07",
        latitude: 40.7138,
        longitude: -74.0080,
        reported_on: (2025, 4, 21),
        status: ReportStatus::InProgress,
    },
    SampleReport {
        id: "3",
        title: "Illegal garbage dump behind mall",
        description: "Someone has been dumping household trash behind the shopping mall. It has accumulated over several weeks and is attracting pests.",
        category: Category::Garbage,
        image_url: "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05",
        latitude: 40.7145,
        longitude: -74.0070,
        reported_on: (2025, 4, 22),
        status: ReportStatus::Pending,
    },
    SampleReport {
        id: "4",
        title: "Water leakage from broken pipe",
        description: "There is a significant water leak from a broken pipe on Oak Street. Water has been flowing continuously for 3 days.",
        category: Category::WaterLeakage,
        image_url: "https://images.unsplash.com/photo-1500673922987-e212871fec22",
        latitude: 40.7150,
        longitude: -74.0065,
        reported_on: (2025, 4, 23),
        status: ReportStatus::Resolved,
    },
];

fn midnight_utc((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// The four demo reports a fresh store starts with, in store order.
pub fn sample_reports() -> Vec<Report> {
    SAMPLES
        .iter()
        .map(|sample| Report {
            id: ReportId(sample.id.to_string()),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            category: sample.category,
            image_url: ImageReference::parse(sample.image_url).ok(),
            latitude: sample.latitude,
            longitude: sample.longitude,
            created_at: midnight_utc(sample.reported_on),
            status: sample.status,
        })
        .collect()
}
