use crate::db::Database;
use crate::error::DbError;
use crate::models::Company;
use crate::table::ResultTable;

const JOBS: &str = "
    SELECT j.jobID, j.title, j.location, j.salary, j.workingHours, j.datePosted,
           r.first_name || ' ' || r.last_name AS recruiter,
           COUNT(a.jobAppID) AS applications
    FROM Job j
    JOIN Recruiter r ON r.recruiterID = j.recruiterID
    LEFT JOIN JobApplication a ON a.jobID = j.jobID
    WHERE j.companyID = ?1
    GROUP BY j.jobID
    ORDER BY j.datePosted DESC, j.jobID";

const RECRUITERS: &str = "
    SELECT recruiterID, first_name, last_name, email, phone
    FROM Recruiter
    WHERE companyID = ?1
    ORDER BY recruiterID";

const APPLICANTS: &str = "
    SELECT DISTINCT ap.applicantID, ap.first_name, ap.last_name, ap.industry,
           ap.email, ap.phone
    FROM JobApplicant ap
    JOIN JobApplication a ON a.applicantID = ap.applicantID
    JOIN Job j ON j.jobID = a.jobID
    WHERE j.companyID = ?1
    ORDER BY ap.applicantID";

const INTERVIEWS: &str = "
    SELECT i.interviewID, i.dateTime, i.location, j.title,
           ap.first_name || ' ' || ap.last_name AS applicant
    FROM Interview i
    JOIN JobApplication a ON a.jobAppID = i.jobAppID
    JOIN Job j ON j.jobID = a.jobID
    JOIN JobApplicant ap ON ap.applicantID = a.applicantID
    WHERE j.companyID = ?1
    ORDER BY i.dateTime";

const APPLICATIONS: &str = "
    SELECT a.jobAppID, j.title, ap.first_name || ' ' || ap.last_name AS applicant,
           a.dateTime, a.status
    FROM JobApplication a
    JOIN Job j ON j.jobID = a.jobID
    JOIN JobApplicant ap ON ap.applicantID = a.applicantID
    WHERE j.companyID = ?1
    ORDER BY a.jobAppID";

fn scoped(db: &Database, company_id: i64, sql: &str) -> Result<ResultTable, DbError> {
    db.fetch::<Company>(company_id)?;
    db.query(sql, [company_id])
}

/// Job listings with the posting recruiter and how many applications each drew.
pub fn jobs(db: &Database, company_id: i64) -> Result<ResultTable, DbError> {
    scoped(db, company_id, JOBS)
}

pub fn recruiters(db: &Database, company_id: i64) -> Result<ResultTable, DbError> {
    scoped(db, company_id, RECRUITERS)
}

/// Everyone who applied to at least one of the company's jobs.
pub fn applicants(db: &Database, company_id: i64) -> Result<ResultTable, DbError> {
    scoped(db, company_id, APPLICANTS)
}

pub fn interviews(db: &Database, company_id: i64) -> Result<ResultTable, DbError> {
    scoped(db, company_id, INTERVIEWS)
}

pub fn applications(db: &Database, company_id: i64) -> Result<ResultTable, DbError> {
    scoped(db, company_id, APPLICATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    fn column(table: &ResultTable, name: &str) -> Vec<String> {
        let col = table.columns.iter().position(|c| c == name).unwrap();
        (0..table.len()).map(|row| table.cell(row, col)).collect()
    }

    #[test]
    fn jobs_carry_recruiter_and_application_count() {
        let db = seeded();
        let apple = jobs(&db, 1).unwrap();
        assert_eq!(column(&apple, "jobID"), vec!["8", "7", "6", "1", "5"]);
        assert_eq!(column(&apple, "applications"), vec!["0", "0", "0", "2", "0"]);
        assert_eq!(apple.cell(0, 6), "Jane Doe");
    }

    #[test]
    fn people_linked_to_the_company() {
        let db = seeded();
        assert_eq!(column(&recruiters(&db, 4).unwrap(), "first_name"), vec!["Jack"]);
        assert_eq!(column(&applicants(&db, 1).unwrap(), "first_name"), vec!["Alice", "Ed"]);

        db.insert(&crate::models::JobApplication {
            job_app_id: 8,
            job_id: 11,
            applicant_id: 5,
            date_time: Some("2025-10-12".into()),
            status: Some("Submitted".into()),
        })
        .unwrap();
        // Two AMD applications, one row.
        assert_eq!(column(&applicants(&db, 3).unwrap(), "applicantID"), vec!["3", "5"]);
    }

    #[test]
    fn interviews_and_applications_for_company_jobs() {
        let db = seeded();
        let samsung = interviews(&db, 4).unwrap();
        assert_eq!(column(&samsung, "applicant"), vec!["Michael Jordan"]);
        assert_eq!(column(&applications(&db, 4).unwrap(), "jobAppID"), vec!["6", "7"]);
        assert!(interviews(&db, 2).unwrap().is_empty());
    }

    #[test]
    fn unknown_company_is_not_found() {
        let db = seeded();
        assert!(matches!(jobs(&db, 9), Err(DbError::NotFound { table: "Company", .. })));
    }
}
