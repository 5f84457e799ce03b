//! UI Components
//!
//! Leptos views over the session store.

mod control_panel;
mod delete_plant_button;
mod detail_panel;
mod local_list;
mod month_bar;
mod species_doc;
mod species_form;
mod submission_dialog;

pub use control_panel::ControlPanel;
pub use delete_plant_button::DeletePlantButton;
pub use detail_panel::DetailPanel;
pub use local_list::LocalList;
pub use month_bar::MonthBar;
pub use species_doc::SpeciesDoc;
pub use species_form::SpeciesForm;
pub use submission_dialog::SubmissionDialog;
