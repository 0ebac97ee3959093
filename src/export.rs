// src/export.rs
//
// Spreadsheet export of the resource and project lists as CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::{error, info};

use crate::error::Result;
use crate::models::{Project, Resource, ResourceStatus};
use crate::notice::Notice;

pub const RESOURCE_COLUMNS: [&str; 6] = ["Nama", "Role", "Status", "Project", "Start Date", "End Date"];
pub const PROJECT_COLUMNS: [&str; 4] = ["Project Name", "Client", "PM", "Status"];
pub const PROJECTS_EXPORT_NAME: &str = "Projects_Data.csv";

pub fn resource_export_name(today: NaiveDate) -> String {
    format!("Resource_Export_{}.csv", today.format("%Y-%m-%d"))
}

fn day_month_year(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// One row per current assignment; resources with none get a single row with the
/// project columns left empty.
pub fn resource_rows(resources: &[Resource]) -> Vec<[String; 6]> {
    let mut rows = Vec::new();
    for resource in resources {
        let status = resource.status.as_str().to_string();
        if resource.current_assignments.is_empty() || resource.status == ResourceStatus::Available {
            rows.push([
                resource.resource_name.clone(),
                String::new(),
                status,
                String::new(),
                String::new(),
                String::new(),
            ]);
            continue;
        }
        for assignment in &resource.current_assignments {
            rows.push([
                resource.resource_name.clone(),
                assignment.project_role.label().to_string(),
                status.clone(),
                assignment.project_name.clone(),
                day_month_year(assignment.start_date),
                day_month_year(assignment.end_date),
            ]);
        }
    }
    rows
}

pub fn project_rows(projects: &[Project]) -> Vec<[String; 4]> {
    projects
        .iter()
        .map(|p| {
            [
                p.project_name.clone(),
                p.client_name.clone(),
                p.dev_man_name.clone().unwrap_or_default(),
                p.status.as_str().to_string(),
            ]
        })
        .collect()
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

pub fn write_resources<W: Write>(out: &mut W, resources: &[Resource]) -> Result<()> {
    write_record(out, &RESOURCE_COLUMNS)?;
    for row in resource_rows(resources) {
        write_record(out, &row)?;
    }
    Ok(())
}

pub fn write_projects<W: Write>(out: &mut W, projects: &[Project]) -> Result<()> {
    write_record(out, &PROJECT_COLUMNS)?;
    for row in project_rows(projects) {
        write_record(out, &row)?;
    }
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

pub fn export_resources(path: &Path, resources: &[Resource]) -> Notice {
    match write_file(path, |out| write_resources(out, resources)) {
        Ok(()) => {
            info!("Exported {} resources to {}", resources.len(), path.display());
            Notice::success("Export successful! File downloaded.")
        }
        Err(e) => {
            error!("Export error: {}", e);
            Notice::error("Failed to export data")
        }
    }
}

pub fn export_projects(path: &Path, projects: &[Project]) -> Notice {
    match write_file(path, |out| write_projects(out, projects)) {
        Ok(()) => {
            info!("Exported {} projects to {}", projects.len(), path.display());
            Notice::success("Project data exported successfully!")
        }
        Err(e) => {
            error!("Export error: {}", e);
            Notice::error("Failed to export data")
        }
    }
}
