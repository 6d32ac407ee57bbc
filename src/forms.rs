use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::db::Database;
use crate::models::{Company, Interview, Job, JobApplicant, JobApplication, Recruiter, Resume};
use crate::records::Record;
use crate::schema::Table;

pub trait Form {
    type Record: Record;

    fn id(&self) -> Option<i64>;

    fn build(self, id: i64) -> Result<Self::Record>;

    /// `base` with every supplied field replaced. An empty string clears a
    /// nullable text column.
    fn apply(self, base: Self::Record) -> Result<Self::Record>;
}

pub fn add<F: Form>(db: &Database, form: F) -> Result<i64> {
    let table = F::Record::TABLE;
    let id = match form.id() {
        Some(id) => id,
        None => db.next_id(table)?,
    };
    let record = form.build(id)?;
    db.insert(&record)
        .with_context(|| format!("Failed to insert into {table}"))
}

pub fn edit<F: Form>(db: &Database, form: F) -> Result<F::Record> {
    let table = F::Record::TABLE;
    let id = form
        .id()
        .ok_or_else(|| anyhow!("--id is required to update {table}"))?;
    let existing: F::Record = db.fetch(id)?;
    let record = form.apply(existing)?;
    db.update(&record)
        .with_context(|| format!("Failed to update {table} #{id}"))?;
    Ok(record)
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DD HH:MM` and normalizes zero padding.
pub fn parse_date(s: &str) -> Result<String, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt.format("%Y-%m-%d %H:%M").to_string());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)"))
}

/// Accepts only `YYYY-MM-DD HH:MM`, so stored times compare correctly as text.
pub fn parse_datetime(s: &str) -> Result<String, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .map_err(|_| format!("'{s}' is not a date and time (expected YYYY-MM-DD HH:MM)"))
}

pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("--{flag} is required"))
}

fn overlay(value: Option<String>, base: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(v),
        None => base,
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[derive(Debug, Subcommand)]
pub enum RecordForm {
    Company(CompanyForm),
    Recruiter(RecruiterForm),
    Job(JobForm),
    #[command(alias = "applicant")]
    JobApplicant(ApplicantForm),
    #[command(alias = "application")]
    JobApplication(ApplicationForm),
    Resume(ResumeForm),
    Interview(InterviewForm),
}

impl RecordForm {
    pub fn add(self, db: &Database) -> Result<(Table, i64)> {
        Ok(match self {
            RecordForm::Company(f) => (Company::TABLE, add(db, f)?),
            RecordForm::Recruiter(f) => (Recruiter::TABLE, add(db, f)?),
            RecordForm::Job(f) => (Job::TABLE, add(db, f)?),
            RecordForm::JobApplicant(f) => (JobApplicant::TABLE, add(db, f)?),
            RecordForm::JobApplication(f) => (JobApplication::TABLE, add(db, f)?),
            RecordForm::Resume(f) => (Resume::TABLE, add(db, f)?),
            RecordForm::Interview(f) => (Interview::TABLE, add(db, f)?),
        })
    }

    pub fn edit(self, db: &Database) -> Result<(Table, i64)> {
        Ok(match self {
            RecordForm::Company(f) => (Company::TABLE, edit(db, f)?.id()),
            RecordForm::Recruiter(f) => (Recruiter::TABLE, edit(db, f)?.id()),
            RecordForm::Job(f) => (Job::TABLE, edit(db, f)?.id()),
            RecordForm::JobApplicant(f) => (JobApplicant::TABLE, edit(db, f)?.id()),
            RecordForm::JobApplication(f) => (JobApplication::TABLE, edit(db, f)?.id()),
            RecordForm::Resume(f) => (Resume::TABLE, edit(db, f)?.id()),
            RecordForm::Interview(f) => (Interview::TABLE, edit(db, f)?.id()),
        })
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CompanyForm {
    /// Company ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl Form for CompanyForm {
    type Record = Company;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<Company> {
        Ok(Company {
            company_id: id,
            name: required(self.name, "name")?,
            industry: self.industry,
            location: self.location,
            email: self.email,
            phone: self.phone,
        })
    }

    fn apply(self, mut base: Company) -> Result<Company> {
        if let Some(name) = self.name {
            base.name = name;
        }
        base.industry = overlay(self.industry, base.industry);
        base.location = overlay(self.location, base.location);
        base.email = overlay(self.email, base.email);
        base.phone = overlay(self.phone, base.phone);
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecruiterForm {
    /// Recruiter ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub company_id: Option<i64>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl Form for RecruiterForm {
    type Record = Recruiter;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<Recruiter> {
        Ok(Recruiter {
            recruiter_id: id,
            company_id: required(self.company_id, "company-id")?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        })
    }

    fn apply(self, mut base: Recruiter) -> Result<Recruiter> {
        base.company_id = self.company_id.unwrap_or(base.company_id);
        base.first_name = overlay(self.first_name, base.first_name);
        base.last_name = overlay(self.last_name, base.last_name);
        base.email = overlay(self.email, base.email);
        base.phone = overlay(self.phone, base.phone);
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct JobForm {
    /// Job ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub company_id: Option<i64>,
    #[arg(long)]
    pub recruiter_id: Option<i64>,
    /// Hourly salary
    #[arg(long)]
    pub salary: Option<f64>,
    /// Working hours per week
    #[arg(long)]
    pub hours: Option<f64>,
    /// Posting date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub posted: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl Form for JobForm {
    type Record = Job;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<Job> {
        Ok(Job {
            job_id: id,
            company_id: required(self.company_id, "company-id")?,
            recruiter_id: required(self.recruiter_id, "recruiter-id")?,
            salary: self.salary,
            working_hours: self.hours,
            date_posted: Some(self.posted.unwrap_or_else(today)),
            location: self.location,
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
        })
    }

    fn apply(self, mut base: Job) -> Result<Job> {
        base.company_id = self.company_id.unwrap_or(base.company_id);
        base.recruiter_id = self.recruiter_id.unwrap_or(base.recruiter_id);
        base.salary = self.salary.or(base.salary);
        base.working_hours = self.hours.or(base.working_hours);
        base.date_posted = self.posted.or(base.date_posted);
        base.location = overlay(self.location, base.location);
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ApplicantForm {
    /// Applicant ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub birthdate: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl Form for ApplicantForm {
    type Record = JobApplicant;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<JobApplicant> {
        Ok(JobApplicant {
            applicant_id: id,
            first_name: required(self.first_name, "first-name")?,
            last_name: self.last_name,
            industry: self.industry,
            birthdate: self.birthdate,
            address: self.address,
            email: self.email,
            phone: self.phone,
        })
    }

    fn apply(self, mut base: JobApplicant) -> Result<JobApplicant> {
        if let Some(first_name) = self.first_name {
            base.first_name = first_name;
        }
        base.last_name = overlay(self.last_name, base.last_name);
        base.industry = overlay(self.industry, base.industry);
        base.birthdate = self.birthdate.or(base.birthdate);
        base.address = overlay(self.address, base.address);
        base.email = overlay(self.email, base.email);
        base.phone = overlay(self.phone, base.phone);
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ApplicationForm {
    /// Application ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub job_id: Option<i64>,
    #[arg(long)]
    pub applicant_id: Option<i64>,
    /// Application date (YYYY-MM-DD [HH:MM]); defaults to now
    #[arg(long, value_parser = parse_date)]
    pub date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl Form for ApplicationForm {
    type Record = JobApplication;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<JobApplication> {
        Ok(JobApplication {
            job_app_id: id,
            job_id: required(self.job_id, "job-id")?,
            applicant_id: required(self.applicant_id, "applicant-id")?,
            date_time: Some(self.date.unwrap_or_else(now)),
            status: Some(self.status.unwrap_or_else(|| "Submitted".to_string())),
        })
    }

    fn apply(self, mut base: JobApplication) -> Result<JobApplication> {
        base.job_id = self.job_id.unwrap_or(base.job_id);
        base.applicant_id = self.applicant_id.unwrap_or(base.applicant_id);
        base.date_time = self.date.or(base.date_time);
        base.status = overlay(self.status, base.status);
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ResumeForm {
    /// Resume ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub applicant_id: Option<i64>,
    /// File whose bytes are stored as the resume
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Upload date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<String>,
}

impl Form for ResumeForm {
    type Record = Resume;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<Resume> {
        let path = required(self.file, "file")?;
        Ok(Resume {
            resume_id: id,
            applicant_id: required(self.applicant_id, "applicant-id")?,
            upload_file: read_file(&path)?,
            upload_date: self.date.unwrap_or_else(today),
        })
    }

    fn apply(self, mut base: Resume) -> Result<Resume> {
        base.applicant_id = self.applicant_id.unwrap_or(base.applicant_id);
        if let Some(path) = &self.file {
            base.upload_file = read_file(path)?;
        }
        base.upload_date = self.date.unwrap_or(base.upload_date);
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct InterviewForm {
    /// Interview ID
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long)]
    pub job_app_id: Option<i64>,
    /// Interview time (YYYY-MM-DD HH:MM); defaults to now
    #[arg(long, value_parser = parse_datetime)]
    pub date: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

impl Form for InterviewForm {
    type Record = Interview;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn build(self, id: i64) -> Result<Interview> {
        Ok(Interview {
            interview_id: id,
            job_app_id: required(self.job_app_id, "job-app-id")?,
            date_time: self.date.unwrap_or_else(now),
            location: required(self.location, "location")?,
        })
    }

    fn apply(self, mut base: Interview) -> Result<Interview> {
        base.job_app_id = self.job_app_id.unwrap_or(base.job_app_id);
        base.date_time = self.date.unwrap_or(base.date_time);
        if let Some(location) = self.location {
            base.location = location;
        }
        Ok(base)
    }
}
