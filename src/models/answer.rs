//! Answer entity model
//!
//! Free-text answer to a Text question, owned by either a guest or a household.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub question_id: Uuid,

    /// Set when the answer belongs to a single guest
    pub guest_id: Option<Uuid>,

    /// Set when the answer belongs to a whole household
    pub household_id: Option<Uuid>,

    pub response: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
