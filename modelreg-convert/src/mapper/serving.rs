use super::{EntityMapper, RecordReader, RecordWriter};
use crate::error::ConvertResult;
use crate::record::Record;
use modelreg_model::{EntityKind, ExecutionState, InferenceService, ServeModel, ServingEnvironment};

impl EntityMapper for ServingEnvironment {
    const KIND: EntityKind = EntityKind::ServingEnvironment;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        w.name(None, self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name(),
            description: r.string("description")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

/// Requires both its registered model and serving environment ids; the
/// store name is prefixed with the serving environment id.
impl EntityMapper for InferenceService {
    const KIND: EntityKind = EntityKind::InferenceService;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        w.required_id_ref("registered_model_id", self.registered_model_id.as_ref())?;
        let environment =
            w.required_id_ref("serving_environment_id", self.serving_environment_id.as_ref())?;
        w.name(Some(environment.as_str()), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.string("runtime", self.runtime.as_ref());
        w.state("desired_state", self.desired_state);
        w.id_ref("model_version_id", self.model_version_id.as_ref())?;
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let environment = r.required_id_ref("serving_environment_id")?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(Some(environment.as_str())),
            description: r.string("description")?,
            runtime: r.string("runtime")?,
            desired_state: r.state("desired_state")?,
            registered_model_id: Some(r.required_id_ref("registered_model_id")?),
            serving_environment_id: Some(environment),
            model_version_id: r.id_ref("model_version_id")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

/// An execution under an inference service (`parent_id`). Its last known
/// state lives in the node's state attribute.
impl EntityMapper for ServeModel {
    const KIND: EntityKind = EntityKind::ServeModel;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.state_attribute(self.last_known_state);
        w.string("description", self.description.as_ref());
        w.required_id_ref("model_version_id", self.model_version_id.as_ref())?;
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            description: r.string("description")?,
            last_known_state: r.state_attribute::<ExecutionState>("last_known_state")?,
            model_version_id: Some(r.required_id_ref("model_version_id")?),
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}
