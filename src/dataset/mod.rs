pub mod import;
pub mod storage;
pub mod types;

pub use import::{import_sheet, read_sheet, sheet_to_dataset, Sheet};
pub use storage::{get_dataset_path, load_dataset, save_dataset};
pub use types::{AlternativeUpdate, CriterionUpdate, Dataset, DATASET_VERSION};
