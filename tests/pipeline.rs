// tests/pipeline.rs
use std::fs;

use job_kpi::storage::{read_jobs, read_ranked, write_jobs, write_ranked, MissingPrerequisite};
use job_kpi::{
    rank_by_efficiency, rank_by_technical_score, JobRecord, RankedJob, RankingConfig,
};
use tempfile::tempdir;

fn offer(title: &str, salary: &str, description: &str) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: "Acme; Partners".to_string(),
        location: "Paris (75)".to_string(),
        raw_salary: salary.to_string(),
        description: description.to_string(),
        link: format!("https://www.free-work.com/fr/tech-it/jobs/{}", title),
    }
}

fn offers() -> Vec<JobRecord> {
    vec![
        offer("analyst", "45k", "Python, SQL et Power BI"),
        offer("freelance", "500/j", "Snowflake \"dbt\" et AWS\nsur Databricks"),
        offer("consultant", "N/C", "Excel, VBA"),
        offer("engineer", "600", "Git, Jira, Scrum"),
        offer("junior", "35", ""),
    ]
}

#[test]
fn offers_table_is_semicolon_utf8_with_bom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offres_emploi.csv");

    write_jobs(&path, &offers()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("title;company;location;raw_salary;description;link")
    );

    assert_eq!(read_jobs(&path).unwrap(), offers());
}

#[test]
fn raw_reader_defaults_missing_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "\u{feff}title;description;extra\nAnalyst;python;ignored\n").unwrap();

    let records = read_jobs(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Analyst");
    assert_eq!(records[0].description, "python");
    assert_eq!(records[0].raw_salary, "N/C");
    assert_eq!(records[0].link, "not found");
}

#[test]
fn ranked_table_survives_schema_mapping() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kpi_tasks_ratio_top10.csv");
    let config = RankingConfig::default();

    let ranked = rank_by_efficiency(&offers(), &config);
    assert_eq!(ranked.len(), 4);
    write_ranked(&path, &ranked).unwrap();

    assert_eq!(read_ranked(&path).unwrap(), ranked);
}

#[test]
fn technical_table_keeps_undefined_ratios() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("resultats_analyses_kpi.csv");

    let ranked = rank_by_technical_score(&offers(), &RankingConfig::default());
    write_ranked(&path, &ranked).unwrap();

    let back = read_ranked(&path).unwrap();
    let consultant = back.iter().find(|job| job.record.title == "consultant").unwrap();
    assert_eq!(consultant.estimated_annual_salary(), 0.0);
    assert_eq!(consultant.task_to_salary_ratio(), None);
}

#[test]
fn oversized_salary_stays_ranked_and_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kpi_tasks_ratio_top10.csv");
    let mut records = offers();
    records.push(offer("overflow", &"9".repeat(400), "python"));

    let ranked = rank_by_efficiency(&records, &RankingConfig::default());
    let overflow = ranked.iter().find(|job| job.record.title == "overflow").unwrap();
    assert_eq!(overflow.estimated_annual_salary(), f64::MAX);
    assert_eq!(overflow.task_to_salary_ratio(), Some(0.0));

    write_ranked(&path, &ranked).unwrap();
    assert_eq!(read_ranked(&path).unwrap(), ranked);
}

#[test]
fn ranked_reader_rejects_raw_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offres_emploi.csv");
    write_jobs(&path, &offers()).unwrap();

    let err = read_ranked(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("missing column(s)"), "{}", message);
    assert!(message.contains("matched_keywords"), "{}", message);
    assert!(message.contains("task_to_salary_ratio"), "{}", message);
}

#[test]
fn ranked_reader_rejects_inconsistent_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "title;company;location;raw_salary;description;link;matched_keywords;technical_complexity;estimated_annual_salary;task_to_salary_ratio\n\
         a;b;c;45k;sql;x;sql;3;45000;0.00002222\n",
    )
    .unwrap();

    let err = read_ranked(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("line 2"));
}

#[test]
fn missing_input_is_a_prerequisite_error() {
    let dir = tempdir().unwrap();
    let err = read_jobs(&dir.path().join("offres_emploi.csv")).unwrap_err();

    assert!(err.downcast_ref::<MissingPrerequisite>().is_some());
    assert!(err.to_string().contains("job-kpi scrape"));
}

#[test]
fn derived_columns_are_identical_across_runs() {
    let dir = tempdir().unwrap();
    let config = RankingConfig::default();

    for (name, rank) in [
        ("technical", rank_by_technical_score as fn(&[JobRecord], &RankingConfig) -> Vec<RankedJob>),
        ("efficiency", rank_by_efficiency),
    ] {
        let first = dir.path().join(format!("{}-1.csv", name));
        let second = dir.path().join(format!("{}-2.csv", name));
        write_ranked(&first, &rank(&offers(), &config)).unwrap();
        write_ranked(&second, &rank(&offers(), &config)).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
