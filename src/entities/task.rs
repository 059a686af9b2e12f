// ✅ Task Entity - to-do items addressed by position
//
// Simple tasks carry a priority. Recurring tasks carry a frequency in days
// and never stay completed: completing one moves its due date forward by the
// frequency and puts it back to pending.

use crate::error::{RecordError, Result};
use crate::store::{self, LoadReport};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub const SIMPLE_TAG: &str = "TareaSimple";
pub const RECURRING_TAG: &str = "TareaRecurrente";

// ============================================================================
// TASK STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,

    #[serde(rename = "en progreso")]
    InProgress,

    #[serde(rename = "completada")]
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en progreso",
            TaskStatus::Completed => "completada",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = RecordError;

    /// Accepts the Spanish names used in files and their English equivalents.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(TaskStatus::Pending),
            "en progreso" | "in progress" => Ok(TaskStatus::InProgress),
            "completada" | "completed" => Ok(TaskStatus::Completed),
            other => Err(RecordError::invalid(format!("estado desconocido: '{other}'"))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TASK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum TaskKind {
    #[serde(rename = "TareaSimple")]
    Simple {
        /// Free text, usually alta/media/baja
        #[serde(rename = "prioridad")]
        priority: String,
    },

    #[serde(rename = "TareaRecurrente")]
    Recurring {
        #[serde(rename = "frecuencia")]
        frequency_days: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "fecha_vencimiento")]
    pub due_date: NaiveDate,

    #[serde(rename = "estado", default)]
    pub status: TaskStatus,

    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    /// New simple task, pending
    pub fn simple(description: String, due_date: NaiveDate, priority: String) -> Self {
        Task {
            description,
            due_date,
            status: TaskStatus::Pending,
            kind: TaskKind::Simple { priority },
        }
    }

    /// New recurring task, pending
    pub fn recurring(description: String, due_date: NaiveDate, frequency_days: u32) -> Self {
        Task {
            description,
            due_date,
            status: TaskStatus::Pending,
            kind: TaskKind::Recurring { frequency_days },
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TaskKind::Simple { .. } => SIMPLE_TAG,
            TaskKind::Recurring { .. } => RECURRING_TAG,
        }
    }

    /// Set the status.
    ///
    /// A recurring task marked completed rolls over instead: the due date
    /// advances by its frequency and the status goes back to pending.
    pub fn update_status(&mut self, new_status: TaskStatus) -> Result<()> {
        match self.kind {
            TaskKind::Recurring { frequency_days } if new_status == TaskStatus::Completed => {
                self.due_date = self
                    .due_date
                    .checked_add_days(Days::new(u64::from(frequency_days)))
                    .ok_or_else(|| {
                        RecordError::invalid(format!(
                            "{} + {} días está fuera del calendario",
                            self.due_date, frequency_days
                        ))
                    })?;
                self.status = TaskStatus::Pending;
                debug!(due_date = %self.due_date, "recurring task rolled over");
            }
            _ => self.status = new_status,
        }
        Ok(())
    }

    pub fn description_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TaskKind::Simple { priority } => write!(
                f,
                "Tarea Simple: {}, Vencimiento: {}, Estado: {}, Prioridad: {}",
                self.description, self.due_date, self.status, priority
            ),
            TaskKind::Recurring { frequency_days } => write!(
                f,
                "Tarea Recurrente: {}, Vencimiento: {}, Estado: {}, Frecuencia: cada {} días",
                self.description, self.due_date, self.status, frequency_days
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub frequency_days: Option<u32>,
}

impl TaskPatch {
    /// Apply the set fields; `priority` and `frequency_days` only touch their own variant.
    pub fn apply(&self, task: &mut Task) {
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        match &mut task.kind {
            TaskKind::Simple { priority } => {
                if let Some(p) = &self.priority {
                    *priority = p.clone();
                }
            }
            TaskKind::Recurring { frequency_days } => {
                if let Some(days) = self.frequency_days {
                    *frequency_days = days;
                }
            }
        }
    }
}

// ============================================================================
// TASK BOARD
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        TaskBoard { tasks: Vec::new() }
    }

    pub fn add(&mut self, task: Task) {
        debug!(description = %task.description, kind = task.kind_name(), "task added");
        self.tasks.push(task);
    }

    pub fn remove(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(self.out_of_range(index));
        }
        debug!(index, "task removed");
        Ok(self.tasks.remove(index))
    }

    pub fn update(&mut self, index: usize, patch: &TaskPatch) -> Result<()> {
        self.get_mut(index).map(|task| patch.apply(task))
    }

    /// Change the status of the task at `index`, with recurring rollover.
    pub fn update_status(&mut self, index: usize, status: TaskStatus) -> Result<()> {
        self.get_mut(index)?.update_status(status)
    }

    pub fn find(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn list(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        store::save_records(path, &self.tasks)
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let LoadReport { records, skipped } = store::load_records(path)?;
        self.tasks = records;
        Ok(skipped)
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let err = self.out_of_range(index);
        self.tasks.get_mut(index).ok_or(err)
    }

    fn out_of_range(&self, index: usize) -> RecordError {
        RecordError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        }
    }
}
