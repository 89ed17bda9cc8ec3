//! Records exchanged with the portal backend

mod campaign;
mod factor;
mod grade;
mod ids;
pub mod lenient;
mod people;
mod target;

pub use campaign::{Campaign, CampaignStatus, CampaignSummary, NewCampaign};
pub use factor::{Factor, FactorBody, FactorType};
pub use grade::{Grade, GradeUpdate, NewGrade};
pub use ids::{ItemId, Numeric};
pub use people::{Employee, EmployeeGroup, Evaluator};
pub use target::{NewTarget, Target};
