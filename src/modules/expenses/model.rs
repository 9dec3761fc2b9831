pub use expense_tracker_models::expenses::*;
