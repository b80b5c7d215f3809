use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use daily_tracker::db::Database;
use daily_tracker::models::*;
use daily_tracker::report::{ReportConfig, ReportGenerator, ReportRequest, ReportSource};
#[macro_use]
extern crate pretty_assertions;
use speculate2::speculate;

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
}

fn on(date: NaiveDate) -> ReportRequest {
    ReportRequest {
        date: Some(date),
        ..Default::default()
    }
}

fn project(db: &Database, name: &str, has_daily: bool) -> Project {
    db.create_project(CreateProjectInput {
        name: name.to_string(),
        has_daily: Some(has_daily),
        ..Default::default()
    })
    .expect("Failed to create project")
}

fn task(db: &Database, project_id: i64, title: &str, end_date: Option<&str>) -> Task {
    db.create_task(CreateTaskInput {
        project_id,
        title: title.to_string(),
        end_date: end_date.map(str::to_string),
        ..Default::default()
    })
    .expect("Failed to create task")
}

fn assign(db: &Database, project_id: i64, name: &str) -> Resource {
    let resource = db
        .create_resource(CreateResourceInput {
            name: name.to_string(),
            ..Default::default()
        })
        .expect("Failed to create resource");
    db.create_resource_project(CreateResourceProjectInput {
        project_id,
        resource_id: resource.id,
        assigned_at: None,
    })
    .expect("Failed to assign");
    resource
}

fn daily(db: &Database, project_id: i64, resource_id: i64, title: &str, end_date: Option<&str>) {
    db.create_daily_task(CreateDailyTaskInput {
        project_id,
        resource_id,
        title: title.to_string(),
        end_date: end_date.map(str::to_string),
        ..Default::default()
    })
    .expect("Failed to create daily task");
}

const EMPTY_SECTIONS: &str = "\
### Tareas finalizadas ayer
- No hay tareas finalizadas en el período especificado.

### Tareas para hoy
- No hay tareas para hoy.

### Tareas a futuro
- No hay tareas a futuro.

";

/// Source whose task lookup always fails.
struct BrokenSource;

impl ReportSource for BrokenSource {
    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(vec![Project {
            id: 1,
            name: "Alpha".to_string(),
            description: None,
            start_date: "01/01/2024".to_string(),
            active: true,
            has_daily: false,
        }])
    }

    fn tasks_by_project(&self, _project_id: i64) -> Result<Vec<Task>> {
        Err(anyhow!("disk I/O error"))
    }

    fn resources_by_project(&self, _project_id: i64) -> Result<Vec<ResourceProject>> {
        Ok(vec![])
    }

    fn active_resources(&self) -> Result<Vec<Resource>> {
        Ok(vec![])
    }

    fn daily_tasks_for(&self, _project_id: i64, _resource_id: i64) -> Result<Vec<DailyTask>> {
        Ok(vec![])
    }

    fn impediments_for(&self, _project_id: i64, _resource_id: i64) -> Result<Vec<DailyImpediment>> {
        Ok(vec![])
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        let generator = ReportGenerator::new(ReportConfig::default());
    }

    describe "document shape" {
        it "lists a task that ended yesterday as completed" {
            let alpha = project(&db, "Alpha", false);
            db.create_task(CreateTaskInput {
                project_id: alpha.id,
                title: "Fix bug".to_string(),
                priority: Some("Alta".to_string()),
                end_date: Some("09/03/2024".to_string()),
                ..Default::default()
            }).expect("Failed to create task");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");

            assert_eq!(report, "\
# Diario 10/03/2024
---

## Alpha

### Tareas finalizadas ayer
- **Fix bug** (Prioridad: Alta, Finalizada: 09/03/2024)

### Tareas para hoy
- No hay tareas para hoy.

### Tareas a futuro
- No hay tareas a futuro.


");
        }

        it "renders the stand-up section for projects with daily" {
            let beta = project(&db, "Beta", true);
            let dana = assign(&db, beta.id, "Dana");
            daily(&db, beta.id, dana.id, "Deploy", None);

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");

            let expected = format!("\
# Diario 10/03/2024
---

## Beta

{}### Daily

#### Dana

##### Qué hice ayer
- Deploy

##### Qué voy a hacer hoy
- (Por completar)

##### Impedimentos
- Sin impedimentos registrados.



", EMPTY_SECTIONS);
            assert_eq!(report, expected);
        }

        it "returns only the header for an unknown project id" {
            project(&db, "Alpha", false);
            let request = ReportRequest {
                date: Some(march(10)),
                project_id: Some(999),
                project_name: None,
            };

            let report = generator.generate_daily_report(&db, &request).expect("Report failed");
            assert_eq!(report, "# Diario 10/03/2024\n---\n\n");
        }

        it "renders details, due-today and future bullets" {
            let alpha = project(&db, "Alpha", false);
            db.create_task(CreateTaskInput {
                project_id: alpha.id,
                title: "Release".to_string(),
                detail: Some("Tag and publish".to_string()),
                priority: Some("Alta".to_string()),
                end_date: Some("10/03/2024".to_string()),
                ..Default::default()
            }).expect("Failed to create task");
            task(&db, alpha.id, "Refactor", None);
            db.create_task(CreateTaskInput {
                project_id: alpha.id,
                title: "Migrate".to_string(),
                detail: Some(String::new()),
                priority: Some("Baja".to_string()),
                end_date: Some("02/04/2024".to_string()),
                ..Default::default()
            }).expect("Failed to create task");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");

            assert_eq!(report, "\
# Diario 10/03/2024
---

## Alpha

### Tareas finalizadas ayer
- No hay tareas finalizadas en el período especificado.

### Tareas para hoy
- **Release** (Prioridad: Alta)
  - Detalle: Tag and publish

### Tareas a futuro
- **Refactor** (Prioridad: Media, Fecha fin: Sin fecha)
- **Migrate** (Prioridad: Baja, Fecha fin: 02/04/2024)


");
        }
    }

    describe "completed window" {
        before {
            let alpha = project(&db, "Alpha", false);
        }

        it "includes the window start and excludes the day before it" {
            task(&db, alpha.id, "on-start", Some("07/03/2024"));
            task(&db, alpha.id, "before-start", Some("06/03/2024"));

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("- **on-start** (Prioridad: Media, Finalizada: 07/03/2024)"));
            assert!(!report.contains("before-start"));
        }

        it "includes inactive tasks" {
            db.create_task(CreateTaskInput {
                project_id: alpha.id,
                title: "Archived".to_string(),
                end_date: Some("08/03/2024".to_string()),
                active: Some(false),
                ..Default::default()
            }).expect("Failed to create task");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("- **Archived** (Prioridad: Media, Finalizada: 08/03/2024)"));
        }

        it "follows the configured length" {
            task(&db, alpha.id, "two-days-ago", Some("08/03/2024"));
            let narrow = ReportGenerator::new(ReportConfig { previous_days_for_report: 1 });

            let report = narrow.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(!report.contains("two-days-ago"));

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("two-days-ago"));
        }

        it "shows a task due on the report date only under today" {
            task(&db, alpha.id, "Due", Some("10/03/2024"));

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("### Tareas para hoy\n- **Due** (Prioridad: Media)\n"));
            assert!(report.contains("### Tareas a futuro\n- No hay tareas a futuro.\n"));
        }

        it "never crashes on a malformed end date" {
            task(&db, alpha.id, "Broken", Some("not-a-date"));

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(!report.contains("Broken"));
            assert_eq!(report, format!("# Diario 10/03/2024\n---\n\n## Alpha\n\n{}\n", EMPTY_SECTIONS));
        }
    }

    describe "stand-up section" {
        before {
            let beta = project(&db, "Beta", true);
            let dana = assign(&db, beta.id, "Dana");
        }

        it "lists open daily tasks and those that ended yesterday" {
            daily(&db, beta.id, dana.id, "Open", None);
            daily(&db, beta.id, dana.id, "Yesterday", Some("09/03/2024"));
            daily(&db, beta.id, dana.id, "Older", Some("08/03/2024"));
            db.create_daily_task(CreateDailyTaskInput {
                project_id: beta.id,
                resource_id: dana.id,
                title: "Dropped".to_string(),
                active: Some(false),
                ..Default::default()
            }).expect("Failed to create daily task");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("##### Qué hice ayer\n- Open\n- Yesterday\n\n"));
            assert!(!report.contains("Older"));
            assert!(!report.contains("Dropped"));
        }

        it "shows the placeholder when nothing was done" {
            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("##### Qué hice ayer\n- No hay tareas registradas.\n\n"));
        }

        it "lists active impediments only" {
            db.create_impediment(CreateImpedimentInput {
                project_id: beta.id,
                resource_id: dana.id,
                impediment: "VPN".to_string(),
                explanation: "No access to staging".to_string(),
                ..Default::default()
            }).expect("Failed to create impediment");
            db.create_impediment(CreateImpedimentInput {
                project_id: beta.id,
                resource_id: dana.id,
                impediment: "Old".to_string(),
                explanation: "Solved".to_string(),
                active: Some(false),
                ..Default::default()
            }).expect("Failed to create impediment");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(report.contains("##### Impedimentos\n- **VPN**: No access to staging\n\n"));
            assert!(!report.contains("Solved"));
        }

        it "skips inactive resources and keeps assignment order" {
            let eve = assign(&db, beta.id, "Eve");
            let finn = assign(&db, beta.id, "Finn");
            db.update_resource(eve.id, UpdateResourceInput {
                active: Some(false),
                ..Default::default()
            }).expect("Update failed");

            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert!(!report.contains("#### Eve"));

            let dana_at = report.find("#### Dana").expect("Dana missing");
            let finn_at = report.find(&format!("#### {}", finn.name)).expect("Finn missing");
            assert!(dana_at < finn_at);
        }

        it "is omitted for projects without daily" {
            let alpha = project(&db, "Alpha", false);
            assign(&db, alpha.id, "Gus");

            let request = ReportRequest {
                date: Some(march(10)),
                project_id: Some(alpha.id),
                project_name: None,
            };
            let report = generator.generate_daily_report(&db, &request).expect("Report failed");
            assert!(!report.contains("### Daily"));
            assert!(!report.contains("Gus"));
        }
    }

    describe "project selection" {
        before {
            project(&db, "Web Portal", false);
            project(&db, "Mobile App", false);
            let legacy = project(&db, "Legacy Web", false);
            db.update_project(legacy.id, UpdateProjectInput {
                active: Some(false),
                ..Default::default()
            }).expect("Update failed");
        }

        it "keeps store order and skips inactive projects" {
            let report = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            let portal = report.find("## Web Portal").expect("missing");
            let mobile = report.find("## Mobile App").expect("missing");
            assert!(portal < mobile);
            assert!(!report.contains("Legacy"));
        }

        it "filters by name ignoring case" {
            let request = ReportRequest {
                date: Some(march(10)),
                project_id: None,
                project_name: Some("WEB".to_string()),
            };
            let report = generator.generate_daily_report(&db, &request).expect("Report failed");
            assert!(report.contains("## Web Portal"));
            assert!(!report.contains("## Mobile App"));
            assert!(!report.contains("## Legacy Web"));
        }

        it "prefers the id over the name" {
            let mobile = db.get_all_projects().expect("Query failed")
                .into_iter().find(|p| p.name == "Mobile App").expect("missing");
            let request = ReportRequest {
                date: Some(march(10)),
                project_id: Some(mobile.id),
                project_name: Some("web".to_string()),
            };
            let report = generator.generate_daily_report(&db, &request).expect("Report failed");
            assert!(report.contains("## Mobile App"));
            assert!(!report.contains("## Web Portal"));
        }
    }

    describe "determinism and failures" {
        it "is byte-identical across calls" {
            let beta = project(&db, "Beta", true);
            let dana = assign(&db, beta.id, "Dana");
            daily(&db, beta.id, dana.id, "Deploy", None);
            task(&db, beta.id, "Ship", Some("09/03/2024"));

            let first = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            let second = generator.generate_daily_report(&db, &on(march(10))).expect("Report failed");
            assert_eq!(first, second);
        }

        it "propagates source errors without a partial document" {
            let err = generator.generate_daily_report(&BrokenSource, &on(march(10))).unwrap_err();
            assert_eq!(err.to_string(), "disk I/O error");
        }
    }
}
