use std::path::PathBuf;

use log::info;
use reqwest::Client;
use serde::Serialize;

use super::{
    error::SchedulerError,
    helpers::{read_catalog, write_catalog},
    models::schedule_model::{SaveReport, ScheduleItem},
    persist::apply_schedule,
};

/// A trait, necessary for every entity that will persist a confirmed schedule.
#[allow(async_fn_in_trait)]
pub trait ScheduleSaver {
    async fn save(&self, items: &[ScheduleItem]) -> Result<SaveReport, SchedulerError>;
}

/// Applies the schedule to the local catalog file and writes it back once.
pub struct JsonCatalogSaver {
    pub catalog_json_path: PathBuf,
}

impl ScheduleSaver for JsonCatalogSaver {
    async fn save(&self, items: &[ScheduleItem]) -> Result<SaveReport, SchedulerError> {
        let mut catalog = read_catalog(&self.catalog_json_path)?;
        let report = apply_schedule(&mut catalog.courses, items);
        write_catalog(&self.catalog_json_path, &catalog)?;
        info!(
            "Stored {} schedule item(s): {} updated, {} created, {} overwritten",
            items.len(),
            report.updated,
            report.created,
            report.overwritten
        );
        Ok(report)
    }
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    schedules: &'a [ScheduleItem],
}

/// Posts the batch to the persist endpoint, which answers with per-item results.
pub struct HttpScheduleSaver {
    pub client: Client,
    pub save_url: String,
}

impl ScheduleSaver for HttpScheduleSaver {
    async fn save(&self, items: &[ScheduleItem]) -> Result<SaveReport, SchedulerError> {
        info!("Posting {} schedule item(s) to {}", items.len(), self.save_url);
        let response = self
            .client
            .post(&self.save_url)
            .json(&SaveRequest { schedules: items })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
