use rusqlite::Row;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::records::Record;
use crate::schema::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruiter {
    pub recruiter_id: i64,
    pub company_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: i64,
    pub company_id: i64,
    pub recruiter_id: i64,
    pub salary: Option<f64>,        // dollars per hour
    pub working_hours: Option<f64>, // hours per week
    pub date_posted: Option<String>,
    pub location: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplicant {
    pub applicant_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub industry: Option<String>,
    pub birthdate: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub job_app_id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub date_time: Option<String>,
    pub status: Option<String>, // "Submitted", "Under Review", "Interview Pending", "Rejected", ...
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub resume_id: i64,
    pub applicant_id: i64,
    #[serde(skip)]
    pub upload_file: Vec<u8>,
    pub upload_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub interview_id: i64,
    pub job_app_id: i64,
    pub date_time: String,
    pub location: String,
}

impl Record for Company {
    const TABLE: Table = Table::Company;

    fn id(&self) -> i64 {
        self.company_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            company_id: row.get(0)?,
            name: row.get(1)?,
            industry: row.get(2)?,
            location: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.company_id.into(),
            self.name.clone().into(),
            self.industry.clone().into(),
            self.location.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
        ]
    }
}

impl Record for Recruiter {
    const TABLE: Table = Table::Recruiter;

    fn id(&self) -> i64 {
        self.recruiter_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            recruiter_id: row.get(0)?,
            company_id: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.recruiter_id.into(),
            self.company_id.into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
        ]
    }
}

impl Recruiter {
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Record for Job {
    const TABLE: Table = Table::Job;

    fn id(&self) -> i64 {
        self.job_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            job_id: row.get(0)?,
            company_id: row.get(1)?,
            recruiter_id: row.get(2)?,
            salary: row.get(3)?,
            working_hours: row.get(4)?,
            date_posted: row.get(5)?,
            location: row.get(6)?,
            title: row.get(7)?,
            description: row.get(8)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.job_id.into(),
            self.company_id.into(),
            self.recruiter_id.into(),
            self.salary.into(),
            self.working_hours.into(),
            self.date_posted.clone().into(),
            self.location.clone().into(),
            self.title.clone().into(),
            self.description.clone().into(),
        ]
    }
}

impl Record for JobApplicant {
    const TABLE: Table = Table::JobApplicant;

    fn id(&self) -> i64 {
        self.applicant_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            applicant_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            industry: row.get(3)?,
            birthdate: row.get(4)?,
            address: row.get(5)?,
            email: row.get(6)?,
            phone: row.get(7)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.applicant_id.into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.industry.clone().into(),
            self.birthdate.clone().into(),
            self.address.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
        ]
    }
}

impl Record for JobApplication {
    const TABLE: Table = Table::JobApplication;

    fn id(&self) -> i64 {
        self.job_app_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            job_app_id: row.get(0)?,
            job_id: row.get(1)?,
            applicant_id: row.get(2)?,
            date_time: row.get(3)?,
            status: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.job_app_id.into(),
            self.job_id.into(),
            self.applicant_id.into(),
            self.date_time.clone().into(),
            self.status.clone().into(),
        ]
    }
}

impl Record for Resume {
    const TABLE: Table = Table::Resume;

    fn id(&self) -> i64 {
        self.resume_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            resume_id: row.get(0)?,
            applicant_id: row.get(1)?,
            upload_file: row.get(2)?,
            upload_date: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.resume_id.into(),
            self.applicant_id.into(),
            self.upload_file.clone().into(),
            self.upload_date.clone().into(),
        ]
    }
}

impl Record for Interview {
    const TABLE: Table = Table::Interview;

    fn id(&self) -> i64 {
        self.interview_id
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            interview_id: row.get(0)?,
            job_app_id: row.get(1)?,
            date_time: row.get(2)?,
            location: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.interview_id.into(),
            self.job_app_id.into(),
            self.date_time.clone().into(),
            self.location.clone().into(),
        ]
    }
}
