use std::path::PathBuf;

use futures::try_join;
use log::info;
use reqwest::Client;

use super::{
    error::SchedulerError,
    helpers::read_catalog,
    models::course_model::{Catalog, Course, EnrollmentPeriod},
};

/// A trait, necessary for every entity that will be used for getting the course catalog.
#[allow(async_fn_in_trait)]
pub trait CourseSource {
    async fn get_catalog(&self) -> Result<Catalog, SchedulerError>;
}

/// Reads the catalog from a local JSON file.
pub struct JsonCatalogSource {
    pub catalog_json_path: PathBuf,
}

impl CourseSource for JsonCatalogSource {
    async fn get_catalog(&self) -> Result<Catalog, SchedulerError> {
        read_catalog(&self.catalog_json_path)
    }
}

/// Fetches courses and enrollment periods from the enrollment REST API.
pub struct HttpCourseSource {
    pub client: Client,
    pub base_url: String,
}

impl HttpCourseSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>, SchedulerError> {
        let request_url = format!("{}/courses", self.base_url.trim_end_matches('/'));
        info!("Getting courses from {}", request_url);
        let response = self.client.get(request_url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_enrollment_periods(&self) -> Result<Vec<EnrollmentPeriod>, SchedulerError> {
        let request_url = format!(
            "{}/enrollment-periods",
            self.base_url.trim_end_matches('/')
        );
        info!("Getting enrollment periods from {}", request_url);
        let response = self.client.get(request_url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl CourseSource for HttpCourseSource {
    async fn get_catalog(&self) -> Result<Catalog, SchedulerError> {
        let (courses, enrollment_periods) =
            try_join!(self.fetch_courses(), self.fetch_enrollment_periods())?;
        info!(
            "Collected {} courses and {} enrollment periods",
            courses.len(),
            enrollment_periods.len()
        );
        Ok(Catalog {
            courses,
            enrollment_periods,
        })
    }
}
