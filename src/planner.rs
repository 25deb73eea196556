//! Interactive planner session.
//!
//! A [`PlannerSession`] owns the project being edited together with the
//! editor state around it: the selected module and an undo/redo history of
//! project snapshots.

use tracing::debug;

use crate::models::{
    KitchenModule, ModuleTemplate, Placement, PlannerError, PlannerProject, ProjectParseError,
};

/// Editing session over a single project.
///
/// # History
///
/// Every edit that changes the project pushes a snapshot and discards any
/// redo tail. Edits on unknown module ids change nothing and record nothing.
/// Undo, redo and loading a project clear the selection.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    project: PlannerProject,
    selected: Option<String>,
    history: Vec<PlannerProject>,
    history_index: usize,
    placement: Placement,
}

impl PlannerSession {
    /// Starts a session on `project` with the default placement policy.
    pub fn new(project: PlannerProject) -> Self {
        Self {
            history: vec![project.clone()],
            project,
            selected: None,
            history_index: 0,
            placement: Placement::default(),
        }
    }

    /// Sets the placement policy used by [`Self::add_module`].
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// The current project.
    pub fn project(&self) -> &PlannerProject {
        &self.project
    }

    /// Ends the session, returning the current project.
    pub fn into_project(self) -> PlannerProject {
        self.project
    }

    /// Id of the selected module, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected module, if any.
    pub fn selected(&self) -> Option<&KitchenModule> {
        self.selected
            .as_deref()
            .and_then(|id| self.project.module(id))
    }

    /// Selects a module. Returns `false` (and keeps the old selection) for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.project.module(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Adds a module using the session's placement policy and selects it.
    pub fn add_module(&mut self, template: &ModuleTemplate) -> Result<String, PlannerError> {
        self.add_module_with(template, self.placement)
    }

    /// Adds a module with an explicit placement and selects it.
    pub fn add_module_with(
        &mut self,
        template: &ModuleTemplate,
        placement: Placement,
    ) -> Result<String, PlannerError> {
        let id = self.project.add_module(template, placement)?.id.clone();
        debug!(module = %id, template = %template.name, "added module");
        self.selected = Some(id.clone());
        self.commit();
        Ok(id)
    }

    /// Moves a module. Unknown ids are a no-op; non-finite positions are
    /// rejected without recording history.
    pub fn move_module(&mut self, id: &str, x: f64, y: f64) -> Result<bool, PlannerError> {
        let changed = self.project.move_module(id, x, y)?;
        if changed {
            self.commit();
        }
        Ok(changed)
    }

    /// Rotates a module a quarter turn. Unknown ids are a no-op.
    pub fn rotate_module(&mut self, id: &str) -> bool {
        let changed = self.project.rotate_module(id);
        if changed {
            self.commit();
        }
        changed
    }

    /// Removes a module, clearing the selection if it pointed at it.
    pub fn remove_module(&mut self, id: &str) -> Option<KitchenModule> {
        let removed = self.project.remove_module(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug!(module = %id, "removed module");
        self.commit();
        Some(removed)
    }

    /// Changes the room size.
    pub fn set_room_size(&mut self, width: f64, height: f64) -> Result<(), PlannerError> {
        self.project.set_room_size(width, height)?;
        self.commit();
        Ok(())
    }

    /// Whether [`Self::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    /// Whether [`Self::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Steps back one snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        self.project = self.history[self.history_index].clone();
        self.selected = None;
        true
    }

    /// Steps forward one snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.history_index += 1;
        self.project = self.history[self.history_index].clone();
        self.selected = None;
        true
    }

    /// Replaces the project with one parsed from `json`.
    ///
    /// On error the session is left exactly as it was.
    pub fn load_json(&mut self, json: &str) -> Result<(), ProjectParseError> {
        let project = PlannerProject::from_json(json)?;
        self.replace_project(project);
        Ok(())
    }

    /// Replaces the project and resets history and selection.
    pub fn replace_project(&mut self, project: PlannerProject) {
        debug!(project = %project.id, "replacing session project");
        self.history = vec![project.clone()];
        self.history_index = 0;
        self.project = project;
        self.selected = None;
    }

    fn commit(&mut self) {
        self.history.truncate(self.history_index + 1);
        self.history.push(self.project.clone());
        self.history_index = self.history.len() - 1;
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(PlannerProject::default())
    }
}
