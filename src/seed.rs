use crate::schema::Table;

/// Seed statements per table, in dependency order. Each table's follow-up
/// UPDATEs run with its INSERTs.
pub const SEED: &[(Table, &[&str])] = &[
    (Table::Company, COMPANIES),
    (Table::Recruiter, RECRUITERS),
    (Table::Job, JOBS),
    (Table::JobApplicant, APPLICANTS),
    (Table::JobApplication, APPLICATIONS),
    (Table::Resume, RESUMES),
    (Table::Interview, INTERVIEWS),
];

const COMPANIES: &[&str] = &[
    "INSERT INTO Company (companyID, name, industry, location, email, phone) VALUES (1, 'Apple Canada', 'Software', '120 Bremner Boulevard Suite 1600, Toronto, Ontario, M5J 0A8', '', '647-943-4400')",
    "INSERT INTO Company (companyID, name, industry, location, email, phone) VALUES (2, 'Royal Bank of Canada (RBC)', 'Banking', 'Toronto, Ontario, Canada', 'recruitment@rbc.com', '1-800-769-2511')",
    "INSERT INTO Company (companyID, name, industry, location, email, phone) VALUES (3, 'AMD', 'Technology', 'Markham, Ontario, Canada', '', '905-882-2600')",
    "INSERT INTO Company (companyID, name, industry, location, email, phone) VALUES (4, 'SAMSUNG', 'Hardware', 'Vancouver, British Columbia', 'recruitment@samsung.com', '416-230-8121')",
    "UPDATE Company SET location = 'Toronto, Ontario, Canada' WHERE companyID = 1",
    "UPDATE Company SET industry = 'Technology' WHERE companyID = 1",
];

const RECRUITERS: &[&str] = &[
    "INSERT INTO Recruiter (recruiterID, companyID, first_name, last_name, email, phone) VALUES (1, 1, 'Jane', 'Doe', 'jane.doe@apple.com', '647-222-3333')",
    "INSERT INTO Recruiter (recruiterID, companyID, first_name, last_name, email, phone) VALUES (2, 2, 'Bob', 'William', 'bob.william@rbc.com', '416-111-1111')",
    "INSERT INTO Recruiter (recruiterID, companyID, first_name, last_name, email, phone) VALUES (3, 3, 'John', 'Daniels', 'john.daniels@amd.com', '905-423-5678')",
    "INSERT INTO Recruiter (recruiterID, companyID, first_name, last_name, email, phone) VALUES (4, 4, 'Jack', 'Jones', 'jack.jones@samsung.com', '647-333-4444')",
];

const JOBS: &[&str] = &[
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (1, 1, 1, 31.50, 36.25, '2025-09-22', 'Toronto, Ontario, Canada', 'Software Engineer', 'Develop and maintain Apple software products.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (2, 2, 2, 24.50, 35.00, '2025-09-24', 'Toronto, Ontario, Canada', 'Financial Analyst', 'Analyze financial data and provide insights for RBC clients.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (3, 3, 3, 28.50, 40.00, '2025-09-26', 'Markham, Ontario, Canada', 'Systems Design Engineer', 'Responsible for designing, integrating, and validating complex hardware and software systems.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (4, 4, 4, 25, 42, '2025-09-28', 'Vancouver, British Columbia, Canada', 'Software Developer', 'Develop and maintain applications for Samsung.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (5, 1, 1, 31.50, 36.25, '2025-09-22', 'Toronto, Ontario, Canada', 'Mobile Developer', 'Develop and maintain Apple mobile products and services.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (6, 1, 1, 31.50, 36.25, '2025-10-04', 'Toronto, Ontario, Canada', 'Janitor', 'Mop the floors and clean the bathrooms.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (7, 1, 1, 40.75, 40.00, '2025-10-10', 'Toronto, Ontario, Canada', 'Data Engineer', 'Design and maintain Apple’s data pipelines.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (8, 1, 1, 29.00, 38.00, '2025-10-11', 'Toronto, Ontario, Canada', 'IT Support Specialist', 'Provide internal tech support for Apple employees.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (9, 2, 2, 22.00, 35.00, '2025-10-08', 'Toronto, Ontario, Canada', 'Bank Teller', 'Assist clients with daily transactions.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (10, 2, 2, 31.50, 37.50, '2025-10-09', 'Toronto, Ontario, Canada', 'Data Analyst', 'Analyze customer trends to improve banking performance.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (11, 3, 3, 45.00, 40.00, '2025-10-06', 'Markham, Ontario, Canada', 'Hardware Engineer', 'Develop and test AMD hardware components.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (12, 3, 3, 35.00, 40.00, '2025-10-07', 'Markham, Ontario, Canada', 'Software Engineer', 'Develop internal tools and automation frameworks for AMD.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (13, 4, 4, 26.50, 40.00, '2025-10-05', 'Vancouver, British Columbia, Canada', 'QA Tester', 'Perform software and hardware quality assurance tests.')",
    "INSERT INTO Job (jobID, companyID, recruiterID, salary, workingHours, datePosted, location, title, description) VALUES (14, 4, 4, 30.00, 40.00, '2025-10-06', 'Vancouver, British Columbia, Canada', 'UI/UX Designer', 'Design user interfaces for Samsung applications.')",
];

const APPLICANTS: &[&str] = &[
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (1, 'Alice', 'Bob', 'Technology', '2002-04-13', '123 Bay Street, Toronto, Ontario, Canada, M1B 2K3', 'alice.bob@gmail.com', '416-123-455')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (2, 'Jake', 'Blake', 'Technology', '2004-05-06', '456 Main Street, Markham, Ontario, Canada, L6H 1F3', 'jake.blake@hotmail.com', '647-444-1947')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (3, 'Griffin', 'Walker', 'Banking', '2003-12-25', '789 Bond Avenue, Ajax, Ontario, Canada, L0H 1H9', 'griffin.walker@outlook.com', '905-289-9876')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (4, 'Ed', 'Stephens', 'Software', '2004-01-25', '145 Bloor Avenue, Toronto, Ontario, Canada, M5B 3K9', 'ed.stephens@outlook.com', '905-444-2121')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (5, 'Joe', 'Random', 'Technology', '2001-07-29', '7622 Markham Road, Markham, Ontario, Canada, L6H 9A3', 'joe.random@gmail.com', '647-543-2211')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (6, 'Michael', 'Jordan', 'Hardware', '2002-11-09', '116 Bond Street, Hamilton, Ontario, Canada, LOP 1B9', 'michael.jordan@gmail.com', '416-989-7777')",
    "INSERT INTO JobApplicant (applicantID, first_name, last_name, industry, birthdate, address, email, phone) VALUES (7, 'Sam', 'Inactive', 'Technology', '2002-04-13', '123 Bay Street, Toronto, Ontario, Canada, M1B 2K3', 'sam.inactive@gmail.com', '416-123-8293')",
];

const APPLICATIONS: &[&str] = &[
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (1, 1, 1, '2025-09-28', 'Rejected')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (2, 2, 2, '2025-09-29', 'Under Review')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (3, 3, 3, '2025-09-30', 'Submitted')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (4, 1, 4, '2025-09-30', 'Interview Pending')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (5, 3, 5, '2025-09-30', 'Interview Pending')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (6, 4, 6, '2025-09-30', 'Interview Pending')",
    "INSERT INTO JobApplication (jobAppID, jobID, applicantID, dateTime, status) VALUES (7, 4, 5, '2025-10-04', 'Interview Pending')",
];

const RESUMES: &[&str] = &[
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (1, 1, CAST('Alice Bob' AS BLOB), '2002-04-13')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (2, 2, CAST('Jake Blake Resume' AS BLOB), '2025-09-28')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (3, 3, CAST('Griffin Walker Resume' AS BLOB), '2025-09-29')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (4, 4, CAST('Ed Stephens Resume' AS BLOB), '2025-09-28')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (5, 5, CAST('Joe Random Resume' AS BLOB), '2025-09-29')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (6, 6, CAST('Michael Jordan Resume' AS BLOB), '2025-09-30')",
    "INSERT INTO Resume (resumeID, applicantID, uploadFile, uploadDate) VALUES (7, 6, CAST('Michael Jordan Resume 2' AS BLOB), '2025-10-04')",
    "UPDATE Resume SET uploadDate = '2025-09-27' WHERE resumeID = 1",
    "UPDATE Resume SET uploadFile = CAST('Alice Bob Resume' AS BLOB) WHERE resumeID = 1",
];

const INTERVIEWS: &[&str] = &[
    "INSERT INTO Interview (interviewID, jobAppID, dateTime, location) VALUES (1, 4, '2025-10-01 10:00', 'Toronto, Ontario, Canada')",
    "INSERT INTO Interview (interviewID, jobAppID, dateTime, location) VALUES (2, 5, '2025-10-02 11:00', 'Markham, Ontario, Canada')",
    "INSERT INTO Interview (interviewID, jobAppID, dateTime, location) VALUES (3, 6, '2025-10-03 13:00', 'Vancouver, British Columbia, Canada')",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_covers_every_table_in_creation_order() {
        let tables: Vec<Table> = SEED.iter().map(|(table, _)| *table).collect();
        assert_eq!(tables, Table::ALL.to_vec());
    }

    #[test]
    fn follow_up_updates_are_applied() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let apple = db
            .query("SELECT industry, location FROM Company WHERE companyID = 1", [])
            .unwrap();
        assert_eq!(apple.cell(0, 0), "Technology");
        assert_eq!(apple.cell(0, 1), "Toronto, Ontario, Canada");

        let resume = db
            .query("SELECT uploadFile, uploadDate FROM Resume WHERE resumeID = 1", [])
            .unwrap();
        assert_eq!(resume.cell(0, 0), "Alice Bob Resume");
        assert_eq!(resume.cell(0, 1), "2025-09-27");
    }

    #[test]
    fn float_columns_store_reals() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let job = db
            .query("SELECT salary, workingHours FROM Job WHERE jobID = 4", [])
            .unwrap();
        assert_eq!(job.cell(0, 0), "25.0");
        assert_eq!(job.cell(0, 1), "42.0");
    }
}
