use super::{EntityMapper, RecordReader, RecordWriter};
use crate::error::ConvertResult;
use crate::record::Record;
use modelreg_model::{EntityKind, ModelVersion, RegisteredModel};

impl EntityMapper for RegisteredModel {
    const KIND: EntityKind = EntityKind::RegisteredModel;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        w.name(None, self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.string("owner", self.owner.as_ref());
        w.state("state", self.state);
        w.list("language", self.language.as_ref());
        w.string("library_name", self.library_name.as_ref());
        w.string("license", self.license.as_ref());
        w.string("license_link", self.license_link.as_ref());
        w.string("logo", self.logo.as_ref());
        w.string("maturity", self.maturity.as_ref());
        w.string("provider", self.provider.as_ref());
        w.string("readme", self.readme.as_ref());
        w.list("tasks", self.tasks.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name(),
            description: r.string("description")?,
            owner: r.string("owner")?,
            state: r.state("state")?,
            language: r.list("language")?,
            library_name: r.string("library_name")?,
            license: r.string("license")?,
            license_link: r.string("license_link")?,
            logo: r.string("logo")?,
            maturity: r.string("maturity")?,
            provider: r.string("provider")?,
            readme: r.string("readme")?,
            tasks: r.list("tasks")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

/// Stored as `<registeredModelId>:<name>`; the owning model id is also kept
/// as a property because the prefix alone is not a reliable parent link.
impl EntityMapper for ModelVersion {
    const KIND: EntityKind = EntityKind::ModelVersion;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let owner = w.required_id_ref("registered_model_id", self.registered_model_id.as_ref())?;
        w.name(Some(owner.as_str()), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.string("author", self.author.as_ref());
        w.state("state", self.state);
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let owner = r.required_id_ref("registered_model_id")?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(Some(owner.as_str())),
            description: r.string("description")?,
            author: r.string("author")?,
            state: r.state("state")?,
            registered_model_id: Some(owner),
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}
