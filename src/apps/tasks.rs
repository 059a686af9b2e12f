// ✅ Tasks console

use super::{prompt_variant, report_load};
use crate::config::AppConfig;
use crate::console::Console;
use crate::entities::task::{Task, TaskBoard, TaskStatus};
use crate::error::{RecordError, Result};
use crate::shell::Menu;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Agregar tarea",
    "Eliminar tarea",
    "Actualizar tarea",
    "Buscar tarea",
    "Mostrar todas las tareas",
    "Guardar en JSON",
    "Cargar desde JSON",
];

pub struct TasksApp {
    config: AppConfig,
    board: TaskBoard,
}

impl TasksApp {
    pub fn new(config: AppConfig) -> Self {
        TasksApp {
            config,
            board: TaskBoard::new(),
        }
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    fn add<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let simple = prompt_variant(console, "Tipo de tarea (1: Simple, 2: Recurrente): ", "tarea")?;
        let description = console.prompt("Descripción de la tarea: ")?;
        let due_date: NaiveDate = console.prompt_parsed("Fecha de vencimiento (YYYY-MM-DD): ")?;

        let task = if simple {
            let priority = console.prompt("Prioridad (alta/media/baja): ")?;
            Task::simple(description, due_date, priority)
        } else {
            let frequency: u32 = console.prompt_parsed("Frecuencia en días: ")?;
            Task::recurring(description, due_date, frequency)
        };

        self.board.add(task);
        console.say("Tarea agregada con éxito")
    }

    fn remove<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la tarea a eliminar: ")?;
        self.board.remove(index)?;
        console.say("Tarea eliminada con éxito")
    }

    fn update_status<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la tarea a actualizar: ")?;
        let status: TaskStatus = console
            .prompt("Nuevo estado (pendiente/en progreso/completada): ")?
            .parse()?;

        self.board.update_status(index, status)?;
        console.say("Tarea actualizada con éxito")?;
        if let Some(task) = self.board.find(index) {
            console.say(task)?;
        }
        Ok(())
    }

    fn find<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la tarea a buscar: ")?;
        match self.board.find(index) {
            Some(task) => console.say(task),
            None => console.say("Tarea no encontrada"),
        }
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.board.is_empty() {
            return console.say("No hay tareas");
        }
        for (idx, task) in self.board.list().enumerate() {
            console.say(format!("{idx}: {task}"))?;
        }
        Ok(())
    }
}

impl Menu for TasksApp {
    fn title(&self) -> &str {
        &self.config.title
    }

    fn entries(&self) -> &'static [&'static str] {
        ENTRIES
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => self.add(console),
            2 => self.remove(console),
            3 => self.update_status(console),
            4 => self.find(console),
            5 => self.list(console),
            6 => {
                self.board.save_to_file(&self.config.data_file)?;
                console.say("Tareas guardadas en JSON")
            }
            7 => {
                let skipped = self.board.load_from_file(&self.config.data_file)?;
                report_load(console, "Tareas cargadas desde JSON", self.board.len(), skipped)
            }
            other => Err(RecordError::invalid(format!("opción {other} no existe"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::test_support::drive;
    use std::fs;

    fn app(dir: &tempfile::TempDir) -> TasksApp {
        TasksApp::new(AppConfig::tasks().with_data_file(dir.path().join("tareas.json")))
    }

    const ADD_REPORT: &str = "1\n1\nInforme\n2024-02-15\nalta\n";
    const ADD_WEEKLY: &str = "1\n2\nRegar plantas\n2024-01-01\n7\n";

    #[test]
    fn test_completing_recurring_task_from_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(&mut app, &format!("{ADD_REPORT}{ADD_WEEKLY}3\n1\ncompletada\n3\n0\ncompletada\n5\n8\n"));
        assert!(out.contains(
            "Tarea Recurrente: Regar plantas, Vencimiento: 2024-01-08, Estado: pendiente, Frecuencia: cada 7 días"
        ));
        assert!(out.contains(
            "0: Tarea Simple: Informe, Vencimiento: 2024-02-15, Estado: completada, Prioridad: alta"
        ));
    }

    #[test]
    fn test_bad_inputs_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(
            &mut app,
            &format!("1\n1\nX\n15/02/2024\n{ADD_REPORT}3\n0\nhecha\n3\n9\npendiente\n4\n9\n8\n"),
        );
        assert!(out.contains("'15/02/2024' no es un valor válido"));
        assert!(out.contains("estado desconocido: 'hecha'"));
        assert!(out.contains("índice 9 fuera de rango (hay 1 registros)"));
        assert!(out.contains("Tarea no encontrada"));
        assert_eq!(app.board().find(0).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_remove_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(&mut app, &format!("{ADD_REPORT}{ADD_WEEKLY}2\n0\n5\n2\n0\n5\n8\n"));
        assert_eq!(out.matches("Tarea eliminada con éxito").count(), 2);
        assert!(out.contains("0: Tarea Recurrente: Regar plantas"));
        assert!(out.contains("No hay tareas"));
    }

    #[test]
    fn test_load_reports_skipped_records() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tareas.json"),
            r#"[
                {"descripcion": "A", "fecha_vencimiento": "2024-01-01", "estado": "pendiente", "prioridad": "baja", "tipo": "TareaSimple"},
                {"descripcion": "B", "fecha_vencimiento": "2024-01-01", "estado": "pendiente", "tipo": "TareaRara"}
            ]"#,
        )
        .unwrap();

        let mut app = app(&dir);
        let out = drive(&mut app, "7\n8\n");
        assert!(out.contains("Tareas cargadas desde JSON (1 registro(s))"));
        assert!(out.contains("Aviso: 1 registro(s) omitido(s)"));
        assert_eq!(app.board().len(), 1);
    }

    #[test]
    fn test_load_notice_covers_malformed_elements() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tareas.json"),
            r#"[
                {"descripcion": "A", "fecha_vencimiento": "01/01/2024", "prioridad": "baja", "tipo": "TareaSimple"},
                {"descripcion": "B", "fecha_vencimiento": "2024-01-01", "frecuencia": null, "tipo": "TareaRecurrente"},
                {"descripcion": "C", "fecha_vencimiento": "2024-01-01", "prioridad": "alta", "tipo": "TareaSimple"}
            ]"#,
        )
        .unwrap();

        let mut app = app(&dir);
        let out = drive(&mut app, "7\n8\n");
        assert!(out.contains("Tareas cargadas desde JSON (1 registro(s))"));
        assert!(out.contains(
            "Aviso: 2 registro(s) omitido(s) por ser no reconocido(s) o mal formado(s)"
        ));
        assert_eq!(app.board().find(0).unwrap().description, "C");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = app(&dir);
        drive(&mut first, &format!("{ADD_REPORT}{ADD_WEEKLY}6\n8\n"));

        let mut second = app(&dir);
        drive(&mut second, "7\n8\n");
        assert_eq!(
            second.board().list().cloned().collect::<Vec<_>>(),
            first.board().list().cloned().collect::<Vec<_>>()
        );
    }
}
