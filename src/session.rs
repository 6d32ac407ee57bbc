use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::error::DbError;
use crate::models::{Company, JobApplicant, Recruiter};
use crate::schema::InitReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Role {
    Admin,
    Applicant,
    Recruiter,
    Company,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub role: Role,
    pub id: Option<i64>,
    pub display_name: String,
    pub init: Option<InitReport>,
}

/// Log in as `role`. Every role except admin initializes the schema first and
/// must name an existing identity.
pub fn login(db: &Database, role: Role, id: Option<i64>) -> Result<Session, DbError> {
    let (id, display_name, init) = match role {
        Role::Admin => (None, "Database Administrator".to_string(), None),
        Role::Applicant => {
            let init = db.initialize()?;
            let applicant: JobApplicant = db.fetch(identity(role, id)?)?;
            let name = match &applicant.last_name {
                Some(last) => format!("{} {}", applicant.first_name, last),
                None => applicant.first_name.clone(),
            };
            (Some(applicant.applicant_id), name, Some(init))
        }
        Role::Recruiter => {
            let init = db.initialize()?;
            let recruiter: Recruiter = db.fetch(identity(role, id)?)?;
            (Some(recruiter.recruiter_id), recruiter.full_name(), Some(init))
        }
        Role::Company => {
            let init = db.initialize()?;
            let company: Company = db.fetch(identity(role, id)?)?;
            (Some(company.company_id), company.name, Some(init))
        }
    };

    info!(?role, ?id, name = %display_name, "login");
    Ok(Session {
        role,
        id,
        display_name,
        init,
    })
}

fn identity(role: Role, id: Option<i64>) -> Result<i64, DbError> {
    id.ok_or(DbError::MissingIdentity {
        role: role_name(role),
    })
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Applicant => "applicant",
        Role::Recruiter => "recruiter",
        Role::Company => "company",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;
    use pretty_assertions::assert_eq;

    #[test]
    fn admin_login_does_not_touch_schema() {
        let db = Database::open_in_memory().unwrap();
        let session = login(&db, Role::Admin, None).unwrap();
        assert_eq!(session.init, None);
        assert!(!db.table_exists("Company").unwrap());
    }

    #[test]
    fn role_login_initializes_and_resolves_identity() {
        let db = Database::open_in_memory().unwrap();
        let session = login(&db, Role::Applicant, Some(3)).unwrap();
        assert_eq!(session.display_name, "Griffin Walker");
        assert_eq!(session.init.unwrap().seeded, Table::ALL.to_vec());

        let session = login(&db, Role::Company, Some(2)).unwrap();
        assert_eq!(session.display_name, "Royal Bank of Canada (RBC)");
        assert!(session.init.unwrap().seeded.is_empty());

        let session = login(&db, Role::Recruiter, Some(4)).unwrap();
        assert_eq!(session.display_name, "Jack Jones");
    }

    #[test]
    fn unknown_identity_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            login(&db, Role::Recruiter, Some(99)),
            Err(DbError::NotFound { table: "Recruiter", id: 99, .. })
        ));
    }

    #[test]
    fn role_login_requires_an_id() {
        let db = Database::open_in_memory().unwrap();
        let err = login(&db, Role::Applicant, None).unwrap_err();
        assert!(matches!(err, DbError::MissingIdentity { role: "applicant" }));
        assert_eq!(err.to_string(), "Logging in as applicant requires --id");
        assert_eq!(login(&db, Role::Admin, None).unwrap().id, None);
    }
}
