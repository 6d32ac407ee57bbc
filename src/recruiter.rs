use anyhow::{Result, bail};
use tracing::info;

use crate::db::Database;
use crate::error::DbError;
use crate::forms::{self, RecruiterForm};
use crate::models::{Job, JobApplication, Recruiter};
use crate::table::ResultTable;

const COMPANY_RECRUITERS: &str = "
    SELECT recruiterID, first_name, last_name, email, phone
    FROM Recruiter
    WHERE companyID = ?1
    ORDER BY recruiterID";

const COMPANY_JOBS: &str = "
    SELECT j.jobID, j.title, j.location, j.salary, j.workingHours, j.datePosted,
           r.first_name || ' ' || r.last_name AS recruiter
    FROM Job j
    JOIN Recruiter r ON r.recruiterID = j.recruiterID
    WHERE j.companyID = ?1
    ORDER BY j.datePosted DESC, j.jobID";

const APPLICATIONS: &str = "
    SELECT a.jobAppID, j.title, ap.first_name || ' ' || ap.last_name AS applicant,
           ap.email, a.dateTime, a.status
    FROM JobApplication a
    JOIN Job j ON j.jobID = a.jobID
    JOIN JobApplicant ap ON ap.applicantID = a.applicantID
    WHERE j.recruiterID = ?1
    ORDER BY a.jobAppID";

const INTERVIEWS_FROM: &str = "
    SELECT i.interviewID, i.dateTime, i.location, j.title,
           ap.first_name || ' ' || ap.last_name AS applicant
    FROM Interview i
    JOIN JobApplication a ON a.jobAppID = i.jobAppID
    JOIN Job j ON j.jobID = a.jobID
    JOIN JobApplicant ap ON ap.applicantID = a.applicantID
    WHERE j.recruiterID = ?1 AND i.dateTime >= ?2
    ORDER BY i.dateTime";

fn company_of(db: &Database, recruiter_id: i64) -> Result<i64, DbError> {
    Ok(db.fetch::<Recruiter>(recruiter_id)?.company_id)
}

pub fn recruiters(db: &Database, recruiter_id: i64) -> Result<ResultTable, DbError> {
    let company_id = company_of(db, recruiter_id)?;
    db.query(COMPANY_RECRUITERS, [company_id])
}

/// Add a colleague; the new recruiter always joins this recruiter's company.
pub fn add_recruiter(db: &Database, recruiter_id: i64, form: RecruiterForm) -> Result<i64> {
    let company_id = company_of(db, recruiter_id)?;
    let id = forms::add(
        db,
        RecruiterForm {
            company_id: Some(company_id),
            ..form
        },
    )?;
    info!(recruiter_id, new_recruiter = id, company_id, "recruiter added");
    Ok(id)
}

pub fn company_jobs(db: &Database, recruiter_id: i64) -> Result<ResultTable, DbError> {
    let company_id = company_of(db, recruiter_id)?;
    db.query(COMPANY_JOBS, [company_id])
}

/// Applications to jobs this recruiter posted.
pub fn applications(db: &Database, recruiter_id: i64) -> Result<ResultTable, DbError> {
    db.fetch::<Recruiter>(recruiter_id)?;
    db.query(APPLICATIONS, [recruiter_id])
}

/// Set the status of an application to one of this recruiter's jobs.
pub fn evaluate(
    db: &Database,
    recruiter_id: i64,
    job_app_id: i64,
    status: &str,
) -> Result<JobApplication> {
    db.fetch::<Recruiter>(recruiter_id)?;
    let mut application: JobApplication = db.fetch(job_app_id)?;
    let job: Job = db.fetch(application.job_id)?;
    if job.recruiter_id != recruiter_id {
        bail!("Application #{job_app_id} is not for one of your jobs");
    }
    let status = status.trim();
    if status.is_empty() {
        bail!("Status cannot be empty");
    }

    application.status = Some(status.to_string());
    db.update(&application)?;
    info!(recruiter_id, job_app_id, status, "application evaluated");
    Ok(application)
}

pub fn upcoming_interviews(db: &Database, recruiter_id: i64) -> Result<ResultTable, DbError> {
    interviews_from(db, recruiter_id, &forms::now())
}

fn interviews_from(db: &Database, recruiter_id: i64, from: &str) -> Result<ResultTable, DbError> {
    db.fetch::<Recruiter>(recruiter_id)?;
    db.query(INTERVIEWS_FROM, rusqlite::params![recruiter_id, from])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interview;
    use pretty_assertions::assert_eq;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    fn column(table: &ResultTable, col: usize) -> Vec<String> {
        (0..table.len()).map(|row| table.cell(row, col)).collect()
    }

    #[test]
    fn recruiters_are_scoped_to_the_company() {
        let db = seeded();
        let id = add_recruiter(
            &db,
            1,
            RecruiterForm {
                company_id: Some(3),
                first_name: Some("Tim".into()),
                last_name: Some("Cook".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(id, 5);
        assert_eq!(db.fetch::<Recruiter>(5).unwrap().company_id, 1);

        let apple = recruiters(&db, 1).unwrap();
        assert_eq!(column(&apple, 1), vec!["Jane", "Tim"]);
        assert_eq!(recruiters(&db, 3).unwrap().len(), 1);
    }

    #[test]
    fn company_jobs_lists_only_own_company() {
        let db = seeded();
        let jobs = company_jobs(&db, 2).unwrap();
        assert_eq!(column(&jobs, 0), vec!["10", "9", "2"]);
        assert_eq!(jobs.cell(0, 6), "Bob William");
    }

    #[test]
    fn applications_cover_the_recruiters_jobs() {
        let db = seeded();
        let apple = applications(&db, 1).unwrap();
        assert_eq!(column(&apple, 0), vec!["1", "4"]);
        assert_eq!(apple.cell(1, 2), "Ed Stephens");
        assert!(applications(&db, 99).is_err());
    }

    #[test]
    fn evaluate_updates_own_applications_only() {
        let db = seeded();
        let updated = evaluate(&db, 3, 3, "Under Review").unwrap();
        assert_eq!(updated.status.as_deref(), Some("Under Review"));
        let stored: JobApplication = db.fetch(3).unwrap();
        assert_eq!(stored.status.as_deref(), Some("Under Review"));

        let err = evaluate(&db, 1, 3, "Rejected").unwrap_err();
        assert!(err.to_string().contains("not for one of your jobs"));
        let stored: JobApplication = db.fetch(3).unwrap();
        assert_eq!(stored.status.as_deref(), Some("Under Review"));

        assert!(evaluate(&db, 3, 3, "  ").is_err());
    }

    #[test]
    fn upcoming_interviews_skip_the_past() {
        let db = seeded();
        assert_eq!(column(&interviews_from(&db, 3, "2025-10-01 00:00").unwrap(), 0), vec!["2"]);
        assert!(interviews_from(&db, 3, "2025-10-02 11:01").unwrap().is_empty());

        db.insert(&Interview {
            interview_id: 4,
            job_app_id: 3,
            date_time: "2999-01-01 09:00".into(),
            location: "Markham, Ontario, Canada".into(),
        })
        .unwrap();
        let upcoming = upcoming_interviews(&db, 3).unwrap();
        assert_eq!(column(&upcoming, 0), vec!["4"]);
        assert_eq!(upcoming.cell(0, 4), "Griffin Walker");
    }

    #[test]
    fn interview_later_today_is_upcoming() {
        let db = seeded();
        let later = (chrono::Local::now() + chrono::Duration::hours(1))
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let id = forms::add(
            &db,
            forms::InterviewForm {
                job_app_id: Some(3),
                date: Some(later.clone()),
                location: Some("Markham, Ontario, Canada".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let upcoming = upcoming_interviews(&db, 3).unwrap();
        assert_eq!(column(&upcoming, 0), vec![id.to_string()]);
        assert_eq!(upcoming.cell(0, 1), later);
    }
}
