//! Domain models and their CLI display forms

pub mod answer;
pub mod audit;
pub mod costs;
pub mod display;
pub mod product;

pub use answer::{Answer, Category, Importance, Question, Response};
pub use audit::{Audit, ProductRef, Questionnaire};
pub use costs::{Consumption, HostingMapping, Recommendation};
pub use product::{ColumnOption, Product, Tool};
