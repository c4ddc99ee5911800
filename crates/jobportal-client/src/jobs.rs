//! Job feature service.
//!
//! One method per backend job/application operation. No session writes,
//! no retries, no cross-call coordination; each call stands alone.

use std::path::Path;

use serde::Serialize;

use jobportal_models::{
    ApiEnvelope, ApplicationCheck, ApplicationStatus, Job, JobApplication, JobForm,
    JobSearchFilters, JobStats, MessageData, PaginatedResponse, SortOptions, UploadData,
};

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::query::QueryBuilder;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_letter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resume_url: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdateRequest {
    status: ApplicationStatus,
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    reason: &'a str,
}

/// Job listing, application and bookmark operations.
#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /jobs` with filters, sort and pagination.
    pub async fn list_jobs(
        &self,
        filters: &JobSearchFilters,
        sort: &SortOptions,
        page: u32,
        limit: u32,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<Job>>> {
        let query = QueryBuilder::new()
            .extend(filters.query_pairs())
            .extend(sort.query_pairs())
            .push("page", page.to_string())
            .push("limit", limit.to_string())
            .build();
        self.client.get(&format!("/jobs?{query}")).await
    }

    pub async fn featured_jobs(&self, limit: u32) -> ClientResult<ApiEnvelope<Vec<Job>>> {
        self.client.get(&format!("/jobs/featured?limit={limit}")).await
    }

    pub async fn recent_jobs(&self, limit: u32) -> ClientResult<ApiEnvelope<Vec<Job>>> {
        self.client.get(&format!("/jobs/recent?limit={limit}")).await
    }

    pub async fn job(&self, id: &str) -> ClientResult<ApiEnvelope<Job>> {
        self.client.get(&format!("/jobs/{id}")).await
    }

    /// `POST /jobs` (employers).
    pub async fn create_job(&self, form: &JobForm) -> ClientResult<ApiEnvelope<Job>> {
        self.client.post("/jobs", form).await
    }

    pub async fn update_job(&self, id: &str, form: &JobForm) -> ClientResult<ApiEnvelope<Job>> {
        self.client.put(&format!("/jobs/{id}"), form).await
    }

    pub async fn delete_job(&self, id: &str) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client.delete(&format!("/jobs/{id}")).await
    }

    pub async fn jobs_by_employer(
        &self,
        employer_id: &str,
        page: u32,
        limit: u32,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<Job>>> {
        self.client
            .get(&format!("/jobs/employer/{employer_id}?page={page}&limit={limit}"))
            .await
    }

    /// `GET /jobs/my-jobs` (authenticated employers).
    pub async fn my_jobs(
        &self,
        page: u32,
        limit: u32,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<Job>>> {
        self.client
            .get(&format!("/jobs/my-jobs?page={page}&limit={limit}"))
            .await
    }

    /// Apply for a job, uploading a resume first when one is given.
    ///
    /// A failed resume upload is reported once, as this call's envelope
    /// outcome; the apply request is not issued.
    pub async fn apply(
        &self,
        job_id: &str,
        cover_letter: Option<&str>,
        resume: Option<&Path>,
    ) -> ClientResult<ApiEnvelope<JobApplication>> {
        let resume_url = match resume {
            Some(file) => {
                let upload: ApiEnvelope<UploadData> =
                    self.client.upload_file("/uploads/resume", file, &[]).await?;
                if !upload.success {
                    return Ok(upload.failure_as());
                }
                match upload.data {
                    Some(data) => Some(data.url),
                    None => return Ok(ApiEnvelope::failure("Resume upload returned no data")),
                }
            }
            None => None,
        };

        self.client
            .post(
                &format!("/jobs/{job_id}/apply"),
                &ApplyRequest {
                    cover_letter,
                    resume_url,
                },
            )
            .await
    }

    /// `GET /jobs/:id/applications` (employers).
    pub async fn job_applications(
        &self,
        job_id: &str,
        page: u32,
        limit: u32,
        status: Option<ApplicationStatus>,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<JobApplication>>> {
        let query = Self::page_query(page, limit, status);
        self.client
            .get(&format!("/jobs/{job_id}/applications?{query}"))
            .await
    }

    /// `GET /applications/my-applications` (job seekers).
    pub async fn my_applications(
        &self,
        page: u32,
        limit: u32,
        status: Option<ApplicationStatus>,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<JobApplication>>> {
        let query = Self::page_query(page, limit, status);
        self.client
            .get(&format!("/applications/my-applications?{query}"))
            .await
    }

    /// `PATCH /applications/:id/status` (employers).
    pub async fn update_application_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> ClientResult<ApiEnvelope<JobApplication>> {
        self.client
            .patch(
                &format!("/applications/{application_id}/status"),
                &StatusUpdateRequest { status },
            )
            .await
    }

    pub async fn application(&self, id: &str) -> ClientResult<ApiEnvelope<JobApplication>> {
        self.client.get(&format!("/applications/{id}")).await
    }

    pub async fn withdraw_application(
        &self,
        application_id: &str,
    ) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .delete(&format!("/applications/{application_id}"))
            .await
    }

    /// Whether the current user has already applied for a job.
    pub async fn application_status(
        &self,
        job_id: &str,
    ) -> ClientResult<ApiEnvelope<ApplicationCheck>> {
        self.client
            .get(&format!("/jobs/{job_id}/application-status"))
            .await
    }

    pub async fn bookmark(&self, job_id: &str) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client.post_empty(&format!("/jobs/{job_id}/bookmark")).await
    }

    pub async fn remove_bookmark(&self, job_id: &str) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client.delete(&format!("/jobs/{job_id}/bookmark")).await
    }

    pub async fn bookmarked_jobs(
        &self,
        page: u32,
        limit: u32,
    ) -> ClientResult<ApiEnvelope<PaginatedResponse<Job>>> {
        self.client
            .get(&format!("/jobs/bookmarks?page={page}&limit={limit}"))
            .await
    }

    /// `GET /jobs/:id/stats` (employers).
    pub async fn job_stats(&self, job_id: &str) -> ClientResult<ApiEnvelope<JobStats>> {
        self.client.get(&format!("/jobs/{job_id}/stats")).await
    }

    pub async fn job_suggestions(&self, query: &str) -> ClientResult<ApiEnvelope<Vec<String>>> {
        self.suggestions("/jobs/suggestions", query).await
    }

    pub async fn skill_suggestions(&self, query: &str) -> ClientResult<ApiEnvelope<Vec<String>>> {
        self.suggestions("/skills/suggestions", query).await
    }

    pub async fn location_suggestions(
        &self,
        query: &str,
    ) -> ClientResult<ApiEnvelope<Vec<String>>> {
        self.suggestions("/locations/suggestions", query).await
    }

    pub async fn report_job(
        &self,
        job_id: &str,
        reason: &str,
    ) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .post(&format!("/jobs/{job_id}/report"), &ReportRequest { reason })
            .await
    }

    async fn suggestions(
        &self,
        path: &str,
        query: &str,
    ) -> ClientResult<ApiEnvelope<Vec<String>>> {
        let encoded = QueryBuilder::new().push("q", query).build();
        self.client.get(&format!("{path}?{encoded}")).await
    }

    fn page_query(page: u32, limit: u32, status: Option<ApplicationStatus>) -> String {
        QueryBuilder::new()
            .push("page", page.to_string())
            .push("limit", limit.to_string())
            .push_opt("status", status.map(|s| s.as_str().to_string()))
            .build()
    }
}
