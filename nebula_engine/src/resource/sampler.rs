/// Texture sampler resource

use std::sync::Arc;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::graphics_device::{AddressMode, Filter, Sampler, SamplerDesc};

#[derive(Debug)]
pub struct TextureSampler {
    pub desc: SamplerDesc,
    sampler: Option<Arc<dyn Sampler>>,
}

impl TextureSampler {
    pub fn new(desc: SamplerDesc) -> Self {
        Self { desc, sampler: None }
    }

    pub fn sampler(&self) -> Option<&Arc<dyn Sampler>> {
        self.sampler.as_ref()
    }

    pub(crate) fn set_sampler(&mut self, sampler: Arc<dyn Sampler>) {
        self.sampler = Some(sampler);
    }

    pub(crate) fn release_gpu(&mut self) {
        self.sampler = None;
    }
}

fn filter_to_u8(filter: Filter) -> u8 {
    match filter {
        Filter::Nearest => 0,
        Filter::Linear => 1,
    }
}

fn filter_from_u8(value: u8) -> Result<Filter> {
    match value {
        0 => Ok(Filter::Nearest),
        1 => Ok(Filter::Linear),
        _ => Err(Error::Format(format!("unknown filter {}", value))),
    }
}

fn address_mode_to_u8(mode: AddressMode) -> u8 {
    match mode {
        AddressMode::Repeat => 0,
        AddressMode::MirroredRepeat => 1,
        AddressMode::ClampToEdge => 2,
    }
}

fn address_mode_from_u8(value: u8) -> Result<AddressMode> {
    match value {
        0 => Ok(AddressMode::Repeat),
        1 => Ok(AddressMode::MirroredRepeat),
        2 => Ok(AddressMode::ClampToEdge),
        _ => Err(Error::Format(format!("unknown address mode {}", value))),
    }
}

impl BinaryWrite for TextureSampler {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer
            .write(&filter_to_u8(self.desc.min_filter))
            .write(&filter_to_u8(self.desc.mag_filter))
            .write(&address_mode_to_u8(self.desc.address_mode))
            .write(&self.desc.max_anisotropy);
    }
}

impl BinaryRead for TextureSampler {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let min_filter = filter_from_u8(deserializer.read()?)?;
        let mag_filter = filter_from_u8(deserializer.read()?)?;
        let address_mode = address_mode_from_u8(deserializer.read()?)?;
        let max_anisotropy = deserializer.read::<f32>()?;

        Ok(Self::new(SamplerDesc {
            min_filter,
            mag_filter,
            address_mode,
            max_anisotropy,
        }))
    }
}
