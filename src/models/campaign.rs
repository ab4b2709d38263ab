use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign::{
    Campaign as DomainCampaign, Form as DomainForm, NewCampaign as DomainNewCampaign,
    NewForm as DomainNewForm,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct Campaign {
    pub id: i32,
    pub name: String,
    pub enregistrement_form_id: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaign<'a> {
    pub name: &'a str,
    pub enregistrement_form_id: Option<i32>,
    pub active: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::forms)]
#[diesel(belongs_to(Campaign))]
pub struct Form {
    pub id: i32,
    pub campaign_id: i32,
    pub name: String,
    pub kind: String,
    pub version: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::forms)]
pub struct NewForm<'a> {
    pub campaign_id: i32,
    pub name: &'a str,
    pub kind: &'a str,
    pub version: i32,
}

impl From<Campaign> for DomainCampaign {
    fn from(c: Campaign) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enregistrement_form_id: c.enregistrement_form_id,
            active: c.active,
            created_at: c.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewCampaign> for NewCampaign<'a> {
    fn from(c: &'a DomainNewCampaign) -> Self {
        Self {
            name: c.name.as_str(),
            enregistrement_form_id: c.enregistrement_form_id,
            active: c.active,
        }
    }
}

impl From<Form> for DomainForm {
    fn from(f: Form) -> Self {
        Self {
            id: f.id,
            campaign_id: f.campaign_id,
            name: f.name,
            kind: f.kind,
            version: f.version,
            created_at: f.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewForm> for NewForm<'a> {
    fn from(f: &'a DomainNewForm) -> Self {
        Self {
            campaign_id: f.campaign_id,
            name: f.name.as_str(),
            kind: f.kind.as_str(),
            version: f.version,
        }
    }
}
