use clap::ValueEnum;
use rusqlite::types::Value;
use serde::Serialize;
use tracing::info;

use crate::db::{self, Database};
use crate::error::DbError;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum Table {
    Company,
    Recruiter,
    Job,
    #[value(alias = "jobapplicant", alias = "applicant")]
    JobApplicant,
    #[value(alias = "jobapplication", alias = "application")]
    JobApplication,
    Resume,
    Interview,
}

impl Table {
    /// Creation order: every table comes after the tables it references.
    pub const ALL: [Table; 7] = [
        Table::Company,
        Table::Recruiter,
        Table::Job,
        Table::JobApplicant,
        Table::JobApplication,
        Table::Resume,
        Table::Interview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Company => "Company",
            Table::Recruiter => "Recruiter",
            Table::Job => "Job",
            Table::JobApplicant => "JobApplicant",
            Table::JobApplication => "JobApplication",
            Table::Resume => "Resume",
            Table::Interview => "Interview",
        }
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            Table::Company => "companyID",
            Table::Recruiter => "recruiterID",
            Table::Job => "jobID",
            Table::JobApplicant => "applicantID",
            Table::JobApplication => "jobAppID",
            Table::Resume => "resumeID",
            Table::Interview => "interviewID",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Company => &["companyID", "name", "industry", "location", "email", "phone"],
            Table::Recruiter => &["recruiterID", "companyID", "first_name", "last_name", "email", "phone"],
            Table::Job => &[
                "jobID",
                "companyID",
                "recruiterID",
                "salary",
                "workingHours",
                "datePosted",
                "location",
                "title",
                "description",
            ],
            Table::JobApplicant => &[
                "applicantID",
                "first_name",
                "last_name",
                "industry",
                "birthdate",
                "address",
                "email",
                "phone",
            ],
            Table::JobApplication => &["jobAppID", "jobID", "applicantID", "dateTime", "status"],
            Table::Resume => &["resumeID", "applicantID", "uploadFile", "uploadDate"],
            Table::Interview => &["interviewID", "jobAppID", "dateTime", "location"],
        }
    }

    pub fn create_sql(self) -> &'static str {
        match self {
            Table::Company => {
                "CREATE TABLE Company (
                    companyID    INTEGER PRIMARY KEY,
                    name         VARCHAR(30) NOT NULL UNIQUE,
                    industry     VARCHAR(100),
                    location     VARCHAR(200),
                    email        VARCHAR(100),
                    phone        VARCHAR(20)
                )"
            }
            Table::Recruiter => {
                "CREATE TABLE Recruiter (
                    recruiterID  INTEGER PRIMARY KEY,
                    companyID    INTEGER NOT NULL,
                    first_name   VARCHAR(30),
                    last_name    VARCHAR(30),
                    email        VARCHAR(100),
                    phone        VARCHAR(20),
                    FOREIGN KEY (companyID) REFERENCES Company (companyID)
                )"
            }
            Table::Job => {
                "CREATE TABLE Job (
                    jobID        INTEGER PRIMARY KEY,
                    companyID    INTEGER NOT NULL,
                    recruiterID  INTEGER NOT NULL,
                    salary       FLOAT,
                    workingHours FLOAT,
                    datePosted   DATE,
                    location     VARCHAR(200),
                    title        VARCHAR(100) NOT NULL,
                    description  VARCHAR(500) NOT NULL,
                    FOREIGN KEY (companyID) REFERENCES Company (companyID),
                    FOREIGN KEY (recruiterID) REFERENCES Recruiter (recruiterID)
                )"
            }
            Table::JobApplicant => {
                "CREATE TABLE JobApplicant (
                    applicantID  INTEGER PRIMARY KEY,
                    first_name   VARCHAR(30) NOT NULL,
                    last_name    VARCHAR(30),
                    industry     VARCHAR(100),
                    birthdate    DATE,
                    address      VARCHAR(200),
                    email        VARCHAR(100),
                    phone        VARCHAR(20)
                )"
            }
            Table::JobApplication => {
                "CREATE TABLE JobApplication (
                    jobAppID     INTEGER PRIMARY KEY,
                    jobID        INTEGER NOT NULL,
                    applicantID  INTEGER NOT NULL,
                    dateTime     DATE,
                    status       VARCHAR(20),
                    FOREIGN KEY (jobID) REFERENCES Job (jobID),
                    FOREIGN KEY (applicantID) REFERENCES JobApplicant (applicantID)
                )"
            }
            Table::Resume => {
                "CREATE TABLE Resume (
                    resumeID     INTEGER PRIMARY KEY,
                    applicantID  INTEGER NOT NULL,
                    uploadFile   BLOB NOT NULL,
                    uploadDate   DATE DEFAULT (date('now', 'localtime')) NOT NULL,
                    FOREIGN KEY (applicantID) REFERENCES JobApplicant (applicantID)
                )"
            }
            Table::Interview => {
                "CREATE TABLE Interview (
                    interviewID  INTEGER PRIMARY KEY,
                    jobAppID     INTEGER NOT NULL,
                    dateTime     DATE DEFAULT (strftime('%Y-%m-%d %H:%M', 'now', 'localtime')) NOT NULL,
                    location     VARCHAR(100) NOT NULL,
                    FOREIGN KEY (jobAppID) REFERENCES JobApplication (jobAppID)
                )"
            }
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct InitReport {
    pub created: Vec<Table>,
    pub existing: Vec<Table>,
    pub seeded: Vec<Table>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DropReport {
    pub dropped: Vec<Table>,
    pub missing: Vec<Table>,
}

impl Database {
    /// Create whatever tables are missing, then seed whichever are empty, all in
    /// one transaction. Safe to run on every login.
    pub fn initialize(&self) -> Result<InitReport, DbError> {
        let report = self.transaction(|conn| {
            let mut report = InitReport::default();
            let mut index = 0;

            for table in Table::ALL {
                if db::table_exists(conn, table.name())? {
                    info!(%table, "table already exists (skipped)");
                    report.existing.push(table);
                } else {
                    db::execute_step(conn, index, table.create_sql())?;
                    info!(%table, "created table");
                    report.created.push(table);
                }
                index += 1;
            }

            for (table, statements) in seed::SEED {
                if !db::is_table_empty(conn, *table)? {
                    index += statements.len();
                    continue;
                }
                for sql in *statements {
                    db::execute_step(conn, index, sql)?;
                    index += 1;
                }
                info!(%table, rows = statements.len(), "seeded table");
                report.seeded.push(*table);
            }

            Ok(report)
        })?;
        info!("database successfully initialized");
        Ok(report)
    }

    /// Create every table; fails and rolls back if any already exists.
    pub fn create_tables(&self) -> Result<Vec<Table>, DbError> {
        let statements: Vec<&str> = Table::ALL.iter().map(|t| t.create_sql()).collect();
        self.run_batch(&statements)?;
        info!("all tables created");
        Ok(Table::ALL.to_vec())
    }

    /// Insert the full sample data set; fails and rolls back on the first conflict.
    pub fn populate_tables(&self) -> Result<usize, DbError> {
        let statements: Vec<&str> = seed::SEED
            .iter()
            .flat_map(|(_, statements)| statements.iter().copied())
            .collect();
        let n = self.run_batch(&statements)?;
        info!(statements = n, "tables populated");
        Ok(n)
    }

    /// Drop every table, children first. Tables that do not exist are skipped.
    pub fn drop_tables(&self) -> Result<DropReport, DbError> {
        self.transaction(|conn| {
            let mut report = DropReport::default();
            for (index, table) in Table::ALL.iter().rev().enumerate() {
                if db::table_exists(conn, table.name())? {
                    db::execute_step(conn, index, &format!("DROP TABLE {}", table.name()))?;
                    info!(%table, "dropped table");
                    report.dropped.push(*table);
                } else {
                    info!(%table, "table does not exist (skipped)");
                    report.missing.push(*table);
                }
            }
            Ok(report)
        })
    }

    pub fn look(&self, table: Table) -> Result<crate::table::ResultTable, DbError> {
        self.query(
            &format!("SELECT * FROM {} ORDER BY {}", table.name(), table.primary_key()),
            [],
        )
    }

    pub fn row_count(&self, table: Table) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        Ok(self.conn().query_row(&sql, [], |row| row.get(0))?)
    }

    pub fn overview(&self) -> Result<crate::table::ResultTable, DbError> {
        let mut rows = Vec::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let count = if self.table_exists(table.name())? {
                Value::Integer(self.row_count(table)?)
            } else {
                Value::Null
            };
            rows.push(vec![Value::Text(table.name().to_string()), count]);
        }
        Ok(crate::table::ResultTable {
            columns: vec!["table".to_string(), "rows".to_string()],
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initialize_creates_and_seeds_everything() {
        let db = Database::open_in_memory().unwrap();
        let report = db.initialize().unwrap();
        assert_eq!(report.created, Table::ALL.to_vec());
        assert!(report.existing.is_empty());
        assert_eq!(report.seeded, Table::ALL.to_vec());

        assert_eq!(db.row_count(Table::Company).unwrap(), 4);
        assert_eq!(db.row_count(Table::Recruiter).unwrap(), 4);
        assert_eq!(db.row_count(Table::Job).unwrap(), 14);
        assert_eq!(db.row_count(Table::JobApplicant).unwrap(), 7);
        assert_eq!(db.row_count(Table::JobApplication).unwrap(), 7);
        assert_eq!(db.row_count(Table::Resume).unwrap(), 7);
        assert_eq!(db.row_count(Table::Interview).unwrap(), 3);
        db.ensure_initialized().unwrap();
    }

    #[test]
    fn initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let second = db.initialize().unwrap();
        assert!(second.created.is_empty());
        assert!(second.seeded.is_empty());
        assert_eq!(second.existing, Table::ALL.to_vec());
        assert_eq!(db.row_count(Table::Job).unwrap(), 14);
    }

    #[test]
    fn initialize_only_seeds_empty_tables() {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        db.populate_tables().unwrap();
        db.execute_update("DELETE FROM Interview", []).unwrap();

        let report = db.initialize().unwrap();
        assert!(report.created.is_empty());
        assert_eq!(report.existing, Table::ALL.to_vec());
        assert_eq!(report.seeded, vec![Table::Interview]);
        assert_eq!(db.row_count(Table::Interview).unwrap(), 3);
        assert_eq!(db.row_count(Table::Company).unwrap(), 4);
    }

    #[test]
    fn seed_violating_foreign_keys_rolls_back_everything() {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        // Company is kept as is, so the Recruiter seed references a missing companyID 1.
        db.execute_update("INSERT INTO Company (companyID, name) VALUES (99, 'Existing Co')", [])
            .unwrap();

        match db.initialize().unwrap_err() {
            DbError::Batch { statement, source, .. } => {
                assert!(statement.starts_with("INSERT INTO Recruiter"));
                assert!(source.to_string().contains("FOREIGN KEY"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(db.row_count(Table::Company).unwrap(), 1);
        assert_eq!(db.row_count(Table::Recruiter).unwrap(), 0);
        assert_eq!(db.row_count(Table::JobApplicant).unwrap(), 0);
        assert!(!db.in_transaction());
    }

    #[test]
    fn failed_seed_rolls_back_table_creation() {
        let db = Database::open_in_memory().unwrap();
        // A Job table with the wrong shape makes the Job seed fail after
        // Company and Recruiter were created and seeded.
        db.execute_update("CREATE TABLE Job (jobID INTEGER PRIMARY KEY)", []).unwrap();

        let err = db.initialize().unwrap_err();
        assert!(matches!(err, DbError::Batch { .. }));
        assert!(!db.table_exists("Company").unwrap());
        assert!(!db.table_exists("Interview").unwrap());
        assert!(db.table_exists("Job").unwrap());
        assert_eq!(db.row_count(Table::Job).unwrap(), 0);
    }

    #[test]
    fn create_tables_fails_when_any_exist() {
        let db = Database::open_in_memory().unwrap();
        db.execute_update(Table::Company.create_sql(), []).unwrap();

        let err = db.create_tables().unwrap_err();
        match err {
            DbError::Batch { index, .. } => assert_eq!(index, 0),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!db.table_exists("Recruiter").unwrap());
    }

    #[test]
    fn populate_twice_rolls_back_second_attempt() {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        let n = db.populate_tables().unwrap();
        assert_eq!(n, seed::SEED.iter().map(|(_, s)| s.len()).sum::<usize>());
        assert!(db.populate_tables().is_err());
        assert_eq!(db.row_count(Table::Company).unwrap(), 4);
    }

    #[test]
    fn drop_tables_skips_missing_ones() {
        let db = Database::open_in_memory().unwrap();
        db.execute_update(Table::Company.create_sql(), []).unwrap();
        db.execute_update(Table::JobApplicant.create_sql(), []).unwrap();

        let report = db.drop_tables().unwrap();
        assert_eq!(report.dropped, vec![Table::JobApplicant, Table::Company]);
        assert_eq!(report.missing.len(), 5);
        assert!(!db.table_exists("Company").unwrap());
    }

    #[test]
    fn column_defaults_use_local_text_formats() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.execute_update("INSERT INTO Interview (interviewID, jobAppID, location) VALUES (9, 3, 'Remote')", [])
            .unwrap();
        db.execute_update("INSERT INTO Resume (resumeID, applicantID, uploadFile) VALUES (9, 3, x'00')", [])
            .unwrap();

        let stored = db
            .query("SELECT i.dateTime, r.uploadDate FROM Interview i, Resume r WHERE i.interviewID = 9 AND r.resumeID = 9", [])
            .unwrap();
        let interview_at = stored.cell(0, 0);
        assert!(chrono::NaiveDateTime::parse_from_str(&interview_at, "%Y-%m-%d %H:%M").is_ok());
        assert_eq!(&interview_at[..10], stored.cell(0, 1));
    }

    #[test]
    fn overview_counts_existing_tables() {
        let db = Database::open_in_memory().unwrap();
        db.execute_update(Table::Company.create_sql(), []).unwrap();
        let overview = db.overview().unwrap();
        assert_eq!(overview.len(), 7);
        assert_eq!(overview.cell(0, 0), "Company");
        assert_eq!(overview.rows[0][1], Value::Integer(0));
        assert_eq!(overview.rows[6][1], Value::Null);

        db.initialize().unwrap();
        assert_eq!(db.overview().unwrap().cell(2, 1), "14");
    }

    #[test]
    fn drop_tables_after_seeding_clears_schema() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let report = db.drop_tables().unwrap();
        assert_eq!(report.dropped.len(), 7);
        assert!(matches!(db.ensure_initialized(), Err(DbError::NotInitialized)));
    }

    #[test]
    fn schema_enforces_constraints() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        // unique company name
        assert!(
            db.execute_update("INSERT INTO Company (companyID, name) VALUES (50, 'AMD')", [])
                .is_err()
        );
        // dangling foreign key
        assert!(
            db.execute_update(
                "INSERT INTO Recruiter (recruiterID, companyID) VALUES (50, 404)",
                []
            )
            .is_err()
        );
        // NOT NULL title
        assert!(
            db.execute_update(
                "INSERT INTO Job (jobID, companyID, recruiterID, description) VALUES (50, 1, 1, 'x')",
                []
            )
            .is_err()
        );
        // default upload date
        db.execute_update(
            "INSERT INTO Resume (resumeID, applicantID, uploadFile) VALUES (50, 1, X'00')",
            [],
        )
        .unwrap();
        let date: String = db
            .conn()
            .query_row("SELECT uploadDate FROM Resume WHERE resumeID = 50", [], |r| r.get(0))
            .unwrap();
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn look_returns_every_column() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        for table in Table::ALL {
            let result = db.look(table).unwrap();
            assert_eq!(result.columns, table.columns().to_vec());
        }
    }

    #[test]
    fn next_id_follows_max_key() {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        assert_eq!(db.next_id(Table::Job).unwrap(), 1);
        db.populate_tables().unwrap();
        assert_eq!(db.next_id(Table::Job).unwrap(), 15);
        assert_eq!(db.next_id(Table::JobApplication).unwrap(), 8);
    }
}
