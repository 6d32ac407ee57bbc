use clap::ValueEnum;
use tracing::info;

use crate::db::Database;
use crate::error::DbError;
use crate::table::ResultTable;

pub const DEFAULT_COMPANY: &str = "Apple Canada";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    /// Companies with posted jobs but no interviews
    IdleCompanies,
    /// Companies above the average working hours
    LongHours,
    /// Recruiters and applicants connected to a company
    Connected,
    /// Companies with applications under review
    UnderReview,
    /// Applicants who have never been interviewed
    NeverInterviewed,
}

impl Report {
    pub const ALL: [Report; 5] = [
        Report::IdleCompanies,
        Report::LongHours,
        Report::Connected,
        Report::UnderReview,
        Report::NeverInterviewed,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Report::IdleCompanies => "Companies with Posted Jobs but No Interviews",
            Report::LongHours => "Companies Above Average Working Hours",
            Report::Connected => "Recruiters & Applicants Connected to a Company",
            Report::UnderReview => "Companies with Applications Under Review",
            Report::NeverInterviewed => "Applicants Who Have Never Been Interviewed",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Report::IdleCompanies => {
                "SELECT c.name AS CompanyName
                 FROM Company c, Job j
                 WHERE c.companyID = j.companyID
                 EXCEPT
                 SELECT c.name AS CompanyName
                 FROM Company c, Job j, JobApplication japp, Interview i
                 WHERE c.companyID = j.companyID
                   AND j.jobID = japp.jobID
                   AND japp.jobAppID = i.jobAppID"
            }
            Report::LongHours => {
                "SELECT c.name AS CompanyName,
                        AVG(j.workingHours) AS AverageWorkingHours,
                        COUNT(j.jobID) AS TotalJobs
                 FROM Company c, Job j
                 WHERE c.companyID = j.companyID
                 GROUP BY c.name
                 HAVING AVG(j.workingHours) > (SELECT AVG(workingHours) FROM Job)
                 ORDER BY c.name"
            }
            Report::Connected => {
                "SELECT r.last_name, r.first_name, r.email
                 FROM Recruiter r, Company c
                 WHERE r.companyID = c.companyID AND c.name = ?1
                 UNION
                 SELECT ja.last_name, ja.first_name, ja.email
                 FROM JobApplicant ja, JobApplication japp, Job j, Company c
                 WHERE c.name = ?1
                   AND ja.applicantID = japp.applicantID
                   AND japp.jobID = j.jobID
                   AND j.companyID = c.companyID"
            }
            Report::UnderReview => {
                "SELECT c.name AS CompanyName
                 FROM Company c
                 WHERE EXISTS (
                     SELECT * FROM Job j, JobApplication japp
                     WHERE j.companyID = c.companyID
                       AND japp.jobID = j.jobID
                       AND japp.status = 'Under Review')"
            }
            Report::NeverInterviewed => {
                "SELECT ja.last_name, ja.first_name, ja.email
                 FROM JobApplicant ja
                 WHERE NOT EXISTS (
                     SELECT * FROM JobApplication japp, Interview i
                     WHERE japp.applicantID = ja.applicantID
                       AND i.jobAppID = japp.jobAppID)"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Each applicant with the jobs they applied for
    ApplicantJobInfo,
    /// Scheduled interviews with job and applicant details
    InterviewSchedules,
    /// Job postings per company and recruiter
    CompanyJobSummary,
    /// Jobs with application counts
    JobData,
    /// Applicants with at least one application and one resume
    ActiveApplicants,
    /// Recruiters with job, application and interview counts
    RecruiterData,
    /// Applicants with interviews, listing company and date
    ApplicantInterview,
    /// Application details: company, job title and status
    JobApplicationDetails,
    /// Recruiters, their companies, and interviews for jobs they manage
    RecruiterInterview,
}

impl View {
    pub const ALL: [View; 9] = [
        View::ApplicantJobInfo,
        View::InterviewSchedules,
        View::CompanyJobSummary,
        View::JobData,
        View::ActiveApplicants,
        View::RecruiterData,
        View::ApplicantInterview,
        View::JobApplicationDetails,
        View::RecruiterInterview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::ApplicantJobInfo => "ApplicantJobInfo",
            View::InterviewSchedules => "InterviewSchedules",
            View::CompanyJobSummary => "CompanyJobSummary",
            View::JobData => "JobData",
            View::ActiveApplicants => "ActiveApplicants",
            View::RecruiterData => "RecruiterData",
            View::ApplicantInterview => "ApplicantInterview",
            View::JobApplicationDetails => "JobApplicationDetails",
            View::RecruiterInterview => "RecruiterInterview",
        }
    }

    pub fn create_sql(self) -> &'static str {
        match self {
            View::ApplicantJobInfo => {
                "CREATE VIEW ApplicantJobInfo AS
                 SELECT a.applicantID,
                        a.first_name,
                        a.last_name,
                        j.title AS job_title,
                        c.name AS company_name,
                        r.first_name || ' ' || r.last_name AS recruiter_name
                 FROM JobApplicant a, JobApplication ja, Job j, Company c, Recruiter r
                 WHERE a.applicantID = ja.applicantID
                   AND ja.jobID = j.jobID
                   AND j.companyID = c.companyID
                   AND j.recruiterID = r.recruiterID"
            }
            View::InterviewSchedules => {
                "CREATE VIEW InterviewSchedules AS
                 SELECT i.interviewID,
                        a.first_name || ' ' || a.last_name AS applicant_name,
                        j.title AS job_title,
                        r.first_name || ' ' || r.last_name AS recruiter_name,
                        i.location
                 FROM Interview i, JobApplication ja, Job j, Recruiter r, JobApplicant a
                 WHERE i.jobAppID = ja.jobAppID
                   AND ja.jobID = j.jobID
                   AND ja.applicantID = a.applicantID
                   AND j.recruiterID = r.recruiterID"
            }
            View::CompanyJobSummary => {
                "CREATE VIEW CompanyJobSummary AS
                 SELECT c.name AS company_name,
                        r.first_name || ' ' || r.last_name AS recruiter_name,
                        COUNT(j.jobID) AS total_jobs_posted
                 FROM Company c, Job j, Recruiter r
                 WHERE c.companyID = j.companyID
                   AND j.recruiterID = r.recruiterID
                 GROUP BY c.name, r.first_name, r.last_name
                 ORDER BY c.name ASC"
            }
            View::JobData => {
                r#"CREATE VIEW JobData ("Job ID", "Title", "Employer", "Employer ID", "Posted by", "Salary", "Working Hours", "Date Posted", "Location", "Description", "Applications Received") AS
                 SELECT Job.jobID, Job.title, Company.name, Company.companyID,
                        Recruiter.first_name || ' ' || Recruiter.last_name,
                        Job.salary, Job.workingHours, Job.datePosted, Job.location, Job.description,
                        COUNT(JobApplication.jobAppID)
                 FROM Job
                 LEFT JOIN JobApplication ON Job.jobID = JobApplication.jobID
                 JOIN Company ON Job.companyID = Company.companyID
                 JOIN Recruiter ON Job.recruiterID = Recruiter.recruiterID
                 GROUP BY Job.jobID, Job.title, Company.name, Company.companyID,
                          Recruiter.first_name || ' ' || Recruiter.last_name,
                          Job.salary, Job.workingHours, Job.datePosted, Job.location, Job.description
                 ORDER BY Job.jobID"#
            }
            View::ActiveApplicants => {
                r#"CREATE VIEW ActiveApplicants ("Applicant ID", "First Name", "Last Name", "Address", "Email", "Phone", "Application Count", "Resume Count") AS
                 SELECT JobApplicant.applicantID, JobApplicant.first_name, JobApplicant.last_name,
                        JobApplicant.address, JobApplicant.email, JobApplicant.phone,
                        COUNT(DISTINCT JobApplication.jobAppID),
                        COUNT(DISTINCT Resume.resumeID)
                 FROM JobApplication
                 JOIN JobApplicant ON JobApplicant.applicantID = JobApplication.applicantID
                 JOIN Resume ON Resume.applicantID = JobApplicant.applicantID
                 GROUP BY JobApplicant.applicantID, JobApplicant.first_name, JobApplicant.last_name,
                          JobApplicant.address, JobApplicant.email, JobApplicant.phone
                 HAVING COUNT(DISTINCT JobApplication.jobAppID) >= 1
                    AND COUNT(DISTINCT Resume.resumeID) >= 1
                 ORDER BY JobApplicant.applicantID"#
            }
            View::RecruiterData => {
                r#"CREATE VIEW RecruiterData ("Recruiter ID", "First Name", "Last Name", "Company ID", "Company Name", "Email", "Phone", "Jobs Posted", "Applications Received", "Interviews Scheduled") AS
                 SELECT Recruiter.recruiterID, Recruiter.first_name, Recruiter.last_name,
                        Company.companyID, Company.name, Recruiter.email, Recruiter.phone,
                        COUNT(DISTINCT Job.jobID),
                        COUNT(DISTINCT JobApplication.jobAppID),
                        COUNT(DISTINCT Interview.interviewID)
                 FROM Recruiter
                 LEFT JOIN Job ON Recruiter.recruiterID = Job.recruiterID
                 LEFT JOIN JobApplication ON JobApplication.jobID = Job.jobID
                 LEFT JOIN Interview ON Interview.jobAppID = JobApplication.jobAppID
                 JOIN Company ON Recruiter.companyID = Company.companyID
                 GROUP BY Recruiter.recruiterID, Recruiter.first_name, Recruiter.last_name,
                          Company.companyID, Company.name, Recruiter.email, Recruiter.phone
                 ORDER BY Recruiter.recruiterID"#
            }
            View::ApplicantInterview => {
                "CREATE VIEW ApplicantInterview AS
                 SELECT JobApplicant.applicantID, first_name, last_name,
                        Company.name AS companyName, Interview.dateTime
                 FROM JobApplicant, JobApplication, Interview, Company, Job
                 WHERE JobApplicant.applicantID = JobApplication.applicantID
                   AND JobApplication.jobAppID = Interview.jobAppID
                   AND JobApplication.jobID = Job.jobID
                   AND Job.companyID = Company.companyID"
            }
            View::JobApplicationDetails => {
                "CREATE VIEW JobApplicationDetails AS
                 SELECT JobApplication.jobAppID, JobApplicant.last_name, JobApplicant.first_name,
                        Job.title, Company.name AS companyName, JobApplication.status
                 FROM JobApplication, JobApplicant, Job, Company
                 WHERE JobApplication.applicantID = JobApplicant.applicantID
                   AND JobApplication.jobID = Job.jobID
                   AND Job.companyID = Company.companyID"
            }
            View::RecruiterInterview => {
                "CREATE VIEW RecruiterInterview AS
                 SELECT Recruiter.recruiterID, Recruiter.last_name, Recruiter.first_name,
                        Company.name AS companyName, Job.title, Interview.dateTime
                 FROM Recruiter, Company, Interview, JobApplication, Job
                 WHERE Recruiter.companyID = Company.companyID
                   AND Job.recruiterID = Recruiter.recruiterID
                   AND Job.jobID = JobApplication.jobID
                   AND JobApplication.jobAppID = Interview.jobAppID"
            }
        }
    }
}

impl Database {
    pub fn run_report(&self, report: Report, company: Option<&str>) -> Result<ResultTable, DbError> {
        self.ensure_initialized()?;
        match report {
            Report::Connected => self.query(report.sql(), [company.unwrap_or(DEFAULT_COMPANY)]),
            _ => self.query(report.sql(), []),
        }
    }

    /// Drop and re-create the view in one transaction, then select from it.
    pub fn show_view(&self, view: View) -> Result<ResultTable, DbError> {
        self.ensure_initialized()?;
        let drop = format!("DROP VIEW IF EXISTS {}", view.name());
        self.run_batch(&[drop.as_str(), view.create_sql()])?;
        info!(view = view.name(), "view created");
        self.query(&format!("SELECT * FROM {}", view.name()), [])
    }
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

    fn first_column(table: &ResultTable) -> Vec<String> {
        (0..table.len()).map(|row| table.cell(row, 0)).collect()
    }

    #[test]
    fn idle_companies_excludes_interviewing_ones() {
        let db = seeded();
        let result = db.run_report(Report::IdleCompanies, None).unwrap();
        assert_eq!(first_column(&result), vec!["Royal Bank of Canada (RBC)"]);
    }

    #[test]
    fn long_hours_compares_against_overall_average() {
        let db = seeded();
        let result = db.run_report(Report::LongHours, None).unwrap();
        assert_eq!(result.columns, vec!["CompanyName", "AverageWorkingHours", "TotalJobs"]);
        assert_eq!(first_column(&result), vec!["AMD", "SAMSUNG"]);
        assert_eq!(result.cell(0, 2), "3");
    }

    #[test]
    fn connected_defaults_to_apple_and_takes_a_company() {
        let db = seeded();
        let apple = db.run_report(Report::Connected, None).unwrap();
        let mut names = first_column(&apple);
        names.sort();
        assert_eq!(names, vec!["Bob", "Doe", "Stephens"]);

        let amd = db.run_report(Report::Connected, Some("AMD")).unwrap();
        let mut names = first_column(&amd);
        names.sort();
        assert_eq!(names, vec!["Daniels", "Random", "Walker"]);
    }

    #[test]
    fn under_review_and_never_interviewed() {
        let db = seeded();
        let review = db.run_report(Report::UnderReview, None).unwrap();
        assert_eq!(first_column(&review), vec!["Royal Bank of Canada (RBC)"]);

        let never = db.run_report(Report::NeverInterviewed, None).unwrap();
        let mut names = first_column(&never);
        names.sort();
        assert_eq!(names, vec!["Blake", "Bob", "Inactive", "Walker"]);
    }

    #[test]
    fn every_view_can_be_created_twice() {
        let db = seeded();
        let expected_rows = [7, 3, 4, 14, 6, 4, 3, 7, 3];
        for (view, rows) in View::ALL.into_iter().zip(expected_rows) {
            assert_eq!(db.show_view(view).unwrap().len(), rows, "{}", view.name());
            assert_eq!(db.show_view(view).unwrap().len(), rows, "{}", view.name());
        }
    }

    #[test]
    fn view_column_lists_are_applied() {
        let db = seeded();
        let jobs = db.show_view(View::JobData).unwrap();
        assert_eq!(jobs.columns[0], "Job ID");
        assert_eq!(jobs.columns[10], "Applications Received");
        // job 1 has two applications
        assert_eq!(jobs.cell(0, 10), "2");
        assert_eq!(jobs.cell(0, 4), "Jane Doe");
    }

    #[test]
    fn reports_require_schema() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.run_report(Report::LongHours, None),
            Err(DbError::NotInitialized)
        ));
        assert!(matches!(db.show_view(View::JobData), Err(DbError::NotInitialized)));
    }
}
