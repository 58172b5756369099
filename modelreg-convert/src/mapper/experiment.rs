use super::{EntityMapper, RecordReader, RecordWriter};
use crate::error::ConvertResult;
use crate::record::Record;
use modelreg_model::{EntityKind, Experiment, ExperimentRun};

impl EntityMapper for Experiment {
    const KIND: EntityKind = EntityKind::Experiment;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        w.name(None, self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.string("owner", self.owner.as_ref());
        w.state("state", self.state);
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
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

/// Stored as `<experimentId>:<name>`.
impl EntityMapper for ExperimentRun {
    const KIND: EntityKind = EntityKind::ExperimentRun;

    fn to_record(&self, _parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let experiment = w.required_id_ref("experiment_id", self.experiment_id.as_ref())?;
        w.name(Some(experiment.as_str()), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.string("description", self.description.as_ref());
        w.string("owner", self.owner.as_ref());
        w.state("state", self.state);
        w.state("status", self.status);
        w.int_literal("start_time_since_epoch", self.start_time_since_epoch.as_ref())?;
        w.int_literal("end_time_since_epoch", self.end_time_since_epoch.as_ref())?;
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let experiment = r.required_id_ref("experiment_id")?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(Some(experiment.as_str())),
            description: r.string("description")?,
            owner: r.string("owner")?,
            state: r.state("state")?,
            status: r.state("status")?,
            experiment_id: Some(experiment),
            start_time_since_epoch: r.int_literal("start_time_since_epoch")?,
            end_time_since_epoch: r.int_literal("end_time_since_epoch")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}
