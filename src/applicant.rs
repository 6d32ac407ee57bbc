use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::db::Database;
use crate::error::DbError;
use crate::forms::{self, ApplicantForm, ResumeForm};
use crate::models::{Company, Job, JobApplicant, JobApplication, Resume};
use crate::records::Record;
use crate::schema::Table;
use crate::table::ResultTable;

pub const SUBMITTED: &str = "Submitted";

const BROWSE_JOBS: &str = "
    SELECT j.jobID, j.title, c.name AS company, j.location, j.salary,
           j.workingHours, j.datePosted
    FROM Job j
    JOIN Company c ON c.companyID = j.companyID
    ORDER BY j.datePosted DESC, j.jobID";

const MY_APPLICATIONS: &str = "
    SELECT a.jobAppID, j.jobID, j.title, c.name AS company, a.status, a.dateTime
    FROM JobApplication a
    JOIN Job j ON j.jobID = a.jobID
    JOIN Company c ON c.companyID = j.companyID
    WHERE a.applicantID = ?1
    ORDER BY a.dateTime DESC, a.jobAppID";

const MY_INTERVIEWS: &str = "
    SELECT i.interviewID, j.title, c.name AS company, i.dateTime, i.location
    FROM Interview i
    JOIN JobApplication a ON a.jobAppID = i.jobAppID
    JOIN Job j ON j.jobID = a.jobID
    JOIN Company c ON c.companyID = j.companyID
    WHERE a.applicantID = ?1
    ORDER BY i.dateTime";

pub fn browse_jobs(db: &Database) -> Result<ResultTable, DbError> {
    db.query(BROWSE_JOBS, [])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetails {
    pub job: Job,
    pub company: String,
}

impl JobDetails {
    pub fn render(&self, width: usize) -> String {
        let job = &self.job;
        let mut out = String::new();
        out.push_str(&format!("{} at {}\n", job.title, self.company));
        out.push_str(&format!("{}\n", "-".repeat(width.min(60))));
        out.push_str(&format!("Location:  {}\n", job.location.as_deref().unwrap_or("-")));
        out.push_str(&format!("Salary:    {}\n", money(job.salary, "/hr")));
        out.push_str(&format!("Hours:     {}\n", money(job.working_hours, " per week")));
        out.push_str(&format!("Posted:    {}\n\n", job.date_posted.as_deref().unwrap_or("-")));
        out.push_str(&textwrap::fill(&job.description, width.max(20)));
        out.push('\n');
        out
    }
}

fn money(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => "-".to_string(),
    }
}

pub fn job_details(db: &Database, job_id: i64) -> Result<JobDetails, DbError> {
    let job: Job = db.fetch(job_id)?;
    let company: Company = db.fetch(job.company_id)?;
    Ok(JobDetails {
        job,
        company: company.name,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    Submitted {
        job_app_id: i64,
        resume_id: Option<i64>,
    },
    AlreadyApplied {
        job_app_id: i64,
    },
}

/// Apply to `job_id`, optionally attaching a resume. A second application to
/// the same job is refused and nothing is written.
pub fn apply(
    db: &Database,
    applicant_id: i64,
    job_id: i64,
    resume: Option<&Path>,
) -> Result<ApplyOutcome> {
    db.fetch::<JobApplicant>(applicant_id)?;
    db.fetch::<Job>(job_id)?;

    let existing: Vec<JobApplication> =
        db.list_where("applicantID = ?1 AND jobID = ?2", [applicant_id, job_id])?;
    if let Some(previous) = existing.first() {
        info!(applicant_id, job_id, job_app_id = previous.job_app_id, "already applied");
        return Ok(ApplyOutcome::AlreadyApplied {
            job_app_id: previous.job_app_id,
        });
    }

    let upload = match resume {
        Some(path) => {
            Some(std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?)
        }
        None => None,
    };

    db.begin()?;
    let submitted = submit(db, applicant_id, job_id, upload);
    match &submitted {
        Ok(_) => db.commit()?,
        Err(_) => db.rollback()?,
    }
    let outcome = submitted?;
    info!(applicant_id, job_id, ?outcome, "application submitted");
    Ok(outcome)
}

fn submit(
    db: &Database,
    applicant_id: i64,
    job_id: i64,
    upload: Option<Vec<u8>>,
) -> Result<ApplyOutcome, DbError> {
    let application = JobApplication {
        job_app_id: db.next_id(Table::JobApplication)?,
        job_id,
        applicant_id,
        date_time: Some(forms::now()),
        status: Some(SUBMITTED.to_string()),
    };
    let job_app_id = db.insert(&application)?;

    let resume_id = match upload {
        Some(bytes) => {
            let resume = Resume {
                resume_id: db.next_id(Table::Resume)?,
                applicant_id,
                upload_file: bytes,
                upload_date: forms::today(),
            };
            Some(db.insert(&resume)?)
        }
        None => None,
    };

    Ok(ApplyOutcome::Submitted {
        job_app_id,
        resume_id,
    })
}

pub fn upload_resume(db: &Database, applicant_id: i64, file: PathBuf) -> Result<i64> {
    let id = forms::add(
        db,
        ResumeForm {
            id: None,
            applicant_id: Some(applicant_id),
            file: Some(file),
            date: None,
        },
    )?;
    info!(applicant_id, resume_id = id, "resume uploaded");
    Ok(id)
}

pub fn my_applications(db: &Database, applicant_id: i64) -> Result<ResultTable, DbError> {
    db.query(MY_APPLICATIONS, [applicant_id])
}

pub fn my_interviews(db: &Database, applicant_id: i64) -> Result<ResultTable, DbError> {
    db.query(MY_INTERVIEWS, [applicant_id])
}

/// The `--id` on `form` is ignored; applicants only edit themselves.
pub fn update_profile(db: &Database, applicant_id: i64, form: ApplicantForm) -> Result<JobApplicant> {
    let updated = forms::edit(
        db,
        ApplicantForm {
            id: Some(applicant_id),
            ..form
        },
    )?;
    info!(applicant_id = updated.id(), "profile updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn jobs_are_listed_newest_first() {
        let db = seeded();
        let jobs = browse_jobs(&db).unwrap();
        assert_eq!(jobs.len(), 14);
        assert_eq!(jobs.cell(0, 0), "8");
        assert_eq!(jobs.cell(0, 2), "Apple Canada");
        assert_eq!(jobs.cell(1, 1), "Data Engineer");
        assert_eq!(jobs.cell(13, 6), "2025-09-22");
    }

    #[test]
    fn job_details_wraps_the_description() {
        let db = seeded();
        let details = job_details(&db, 3).unwrap();
        assert_eq!(details.company, "AMD");

        let text = details.render(40);
        assert!(text.starts_with("Systems Design Engineer at AMD\n"));
        assert!(text.contains("Salary:    28.50/hr"));
        assert!(text.lines().all(|line| line.chars().count() <= 40));
        assert!(matches!(job_details(&db, 99), Err(DbError::NotFound { .. })));
    }

    #[test]
    fn applying_twice_is_refused() {
        let db = seeded();
        assert_eq!(
            apply(&db, 1, 1, None).unwrap(),
            ApplyOutcome::AlreadyApplied { job_app_id: 1 }
        );
        assert_eq!(db.row_count(Table::JobApplication).unwrap(), 7);
    }

    #[test]
    fn apply_inserts_a_submitted_application_with_resume() {
        let db = seeded();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Alice Bob, data engineering").unwrap();

        let outcome = apply(&db, 1, 7, Some(file.path())).unwrap();
        assert_eq!(
            outcome,
            ApplyOutcome::Submitted {
                job_app_id: 8,
                resume_id: Some(8),
            }
        );

        let application: JobApplication = db.fetch(8).unwrap();
        assert_eq!(application.status.as_deref(), Some(SUBMITTED));
        assert_eq!((application.job_id, application.applicant_id), (7, 1));
        let resume: Resume = db.fetch(8).unwrap();
        assert_eq!(resume.upload_file, b"Alice Bob, data engineering".to_vec());
        assert!(!db.in_transaction());
    }

    #[test]
    fn apply_to_unknown_job_fails() {
        let db = seeded();
        let err = apply(&db, 1, 404, None).unwrap_err();
        assert!(err.to_string().contains("404"));
        assert_eq!(db.row_count(Table::JobApplication).unwrap(), 7);
    }

    #[test]
    fn upload_resume_uses_next_id_and_today() {
        let db = seeded();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Griffin Walker Resume v2").unwrap();

        let id = upload_resume(&db, 3, file.path().to_path_buf()).unwrap();
        assert_eq!(id, 8);
        let resume: Resume = db.fetch(id).unwrap();
        assert_eq!(resume.applicant_id, 3);
        assert_eq!(resume.upload_date, forms::today());
    }

    #[test]
    fn lists_own_applications_and_interviews() {
        let db = seeded();
        let applications = my_applications(&db, 5).unwrap();
        assert_eq!(applications.len(), 2);
        assert_eq!(applications.cell(0, 3), "SAMSUNG");
        assert_eq!(applications.cell(1, 2), "Systems Design Engineer");

        let interviews = my_interviews(&db, 4).unwrap();
        assert_eq!(interviews.len(), 1);
        assert_eq!(interviews.cell(0, 3), "2025-10-01 10:00");
        assert!(my_interviews(&db, 7).unwrap().is_empty());
    }

    #[test]
    fn update_profile_only_touches_the_signed_in_applicant() {
        let db = seeded();
        let updated = update_profile(
            &db,
            2,
            ApplicantForm {
                id: Some(6),
                phone: Some("647-000-0000".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.applicant_id, 2);
        assert_eq!(updated.phone.as_deref(), Some("647-000-0000"));
        assert_eq!(updated.first_name, "Jake");

        let untouched: JobApplicant = db.fetch(6).unwrap();
        assert_eq!(untouched.phone.as_deref(), Some("416-989-7777"));
    }
}
