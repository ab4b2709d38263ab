use diesel::prelude::*;

use crate::domain::campaign::{Campaign, Form, NewCampaign, NewForm};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CampaignReader, CampaignWriter, DieselRepository};
use crate::schema::{campaigns, forms};

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<Campaign>> {
        use crate::models::campaign::Campaign as DbCampaign;

        let mut conn = self.conn()?;
        let campaign = campaigns::table
            .find(id)
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        Ok(campaign.map(Into::into))
    }

    fn list_campaigns(&self) -> RepositoryResult<Vec<Campaign>> {
        use crate::models::campaign::Campaign as DbCampaign;

        let mut conn = self.conn()?;
        let items = campaigns::table
            .order(campaigns::id.desc())
            .load::<DbCampaign>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn list_forms(&self, campaign_id: i32) -> RepositoryResult<Vec<Form>> {
        use crate::models::campaign::Form as DbForm;

        let mut conn = self.conn()?;
        let items = forms::table
            .filter(forms::campaign_id.eq(campaign_id))
            .order((forms::kind.asc(), forms::version.desc()))
            .load::<DbForm>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    fn get_active_enregistrement_form(&self) -> RepositoryResult<Option<Form>> {
        use crate::models::campaign::{Campaign as DbCampaign, Form as DbForm};

        let mut conn = self.conn()?;

        let Some(active) = campaigns::table
            .filter(campaigns::active.eq(true))
            .order(campaigns::id.desc())
            .first::<DbCampaign>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        // Explicit selection wins, otherwise the campaign's latest
        // enregistrement form.
        let form = match active.enregistrement_form_id {
            Some(form_id) => forms::table
                .find(form_id)
                .first::<DbForm>(&mut conn)
                .optional()?,
            None => forms::table
                .filter(forms::campaign_id.eq(active.id))
                .filter(forms::kind.eq("enregistrement"))
                .order(forms::version.desc())
                .first::<DbForm>(&mut conn)
                .optional()?,
        };

        Ok(form.map(Into::into))
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        use crate::models::campaign::{Campaign as DbCampaign, NewCampaign as DbNewCampaign};

        let mut conn = self.conn()?;
        let insertable: DbNewCampaign = new_campaign.into();
        let created = diesel::insert_into(campaigns::table)
            .values(&insertable)
            .get_result::<DbCampaign>(&mut conn)?;

        Ok(created.into())
    }

    fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form> {
        use crate::models::campaign::{Form as DbForm, NewForm as DbNewForm};

        let mut conn = self.conn()?;
        let insertable: DbNewForm = new_form.into();
        let created = diesel::insert_into(forms::table)
            .values(&insertable)
            .get_result::<DbForm>(&mut conn)?;

        Ok(created.into())
    }

    fn set_active_campaign(&self, campaign_id: i32) -> RepositoryResult<Campaign> {
        use crate::models::campaign::Campaign as DbCampaign;

        let mut conn = self.conn()?;

        diesel::update(campaigns::table)
            .set(campaigns::active.eq(false))
            .execute(&mut conn)?;

        let activated = diesel::update(campaigns::table.find(campaign_id))
            .set(campaigns::active.eq(true))
            .get_result::<DbCampaign>(&mut conn)?;

        Ok(activated.into())
    }
}
