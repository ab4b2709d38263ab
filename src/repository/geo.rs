use diesel::prelude::*;

use crate::domain::geo::{Aire, GeoHierarchy, Province, Zone};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, GeoReader, GeoWriter};
use crate::schema::{aires, provinces, zones};

impl GeoReader for DieselRepository {
    fn list_provinces(&self) -> RepositoryResult<Vec<Province>> {
        use crate::models::geo::Province as DbProvince;

        let mut conn = self.conn()?;
        let items = provinces::table
            .order(provinces::name.asc())
            .load::<DbProvince>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn list_zones(&self, province_id: Option<i32>) -> RepositoryResult<Vec<Zone>> {
        use crate::models::geo::Zone as DbZone;

        let mut conn = self.conn()?;
        let mut query = zones::table.into_boxed();
        if let Some(id) = province_id {
            query = query.filter(zones::province_id.eq(id));
        }
        let items = query
            .order(zones::name.asc())
            .load::<DbZone>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn list_aires(&self, zone_id: Option<i32>) -> RepositoryResult<Vec<Aire>> {
        use crate::models::geo::Aire as DbAire;

        let mut conn = self.conn()?;
        let mut query = aires::table.into_boxed();
        if let Some(id) = zone_id {
            query = query.filter(aires::zone_id.eq(id));
        }
        let items = query
            .order(aires::name.asc())
            .load::<DbAire>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl GeoWriter for DieselRepository {
    fn sync_hierarchy(&self, hierarchy: &GeoHierarchy) -> RepositoryResult<usize> {
        use crate::models::geo::{
            Aire as DbAire, NewAire, NewProvince, NewZone, Province as DbProvince, Zone as DbZone,
        };

        let mut conn = self.conn()?;

        let created = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut created = 0;

            for province_node in &hierarchy.provinces {
                let province = match provinces::table
                    .filter(provinces::name.eq(&province_node.name))
                    .first::<DbProvince>(conn)
                    .optional()?
                {
                    Some(p) => p,
                    None => {
                        created += 1;
                        diesel::insert_into(provinces::table)
                            .values(&NewProvince {
                                name: &province_node.name,
                            })
                            .get_result::<DbProvince>(conn)?
                    }
                };

                for zone_node in &province_node.zones {
                    let zone = match zones::table
                        .filter(zones::province_id.eq(province.id))
                        .filter(zones::name.eq(&zone_node.name))
                        .first::<DbZone>(conn)
                        .optional()?
                    {
                        Some(z) => z,
                        None => {
                            created += 1;
                            diesel::insert_into(zones::table)
                                .values(&NewZone {
                                    province_id: province.id,
                                    name: &zone_node.name,
                                })
                                .get_result::<DbZone>(conn)?
                        }
                    };

                    for aire_name in &zone_node.aires {
                        let existing = aires::table
                            .filter(aires::zone_id.eq(zone.id))
                            .filter(aires::name.eq(aire_name))
                            .first::<DbAire>(conn)
                            .optional()?;

                        if existing.is_none() {
                            created += 1;
                            diesel::insert_into(aires::table)
                                .values(&NewAire {
                                    zone_id: zone.id,
                                    name: aire_name,
                                })
                                .execute(conn)?;
                        }
                    }
                }
            }

            Ok(created)
        })?;

        Ok(created)
    }
}
