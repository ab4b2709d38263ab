use diesel::prelude::*;

use crate::domain::geo::{Aire as DomainAire, Province as DomainProvince, Zone as DomainZone};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::provinces)]
pub struct Province {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::provinces)]
pub struct NewProvince<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::zones)]
#[diesel(belongs_to(Province))]
pub struct Zone {
    pub id: i32,
    pub province_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::zones)]
pub struct NewZone<'a> {
    pub province_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::aires)]
#[diesel(belongs_to(Zone))]
pub struct Aire {
    pub id: i32,
    pub zone_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::aires)]
pub struct NewAire<'a> {
    pub zone_id: i32,
    pub name: &'a str,
}

impl From<Province> for DomainProvince {
    fn from(p: Province) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

impl From<Zone> for DomainZone {
    fn from(z: Zone) -> Self {
        Self {
            id: z.id,
            province_id: z.province_id,
            name: z.name,
        }
    }
}

impl From<Aire> for DomainAire {
    fn from(a: Aire) -> Self {
        Self {
            id: a.id,
            zone_id: a.zone_id,
            name: a.name,
        }
    }
}
