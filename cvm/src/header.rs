use crate::ext::{ReadAt, WriteAt};
use crate::{HEADER_SIZE, SECTOR_SIZE};

/// Total container size, `input + 3 sectors`
pub const TOTAL_SIZE_OFFSET: u64 = 0x20;
/// `input + 2 sectors - 0xC`
pub const ZONE_SIZE_OFFSET: u64 = 0x1000 + 0x08;
/// Size of the wrapped image
pub const IMAGE_SIZE_OFFSET: u64 = 0x1000 + 0x34;

/// Size fields stored in a container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSizes {
    pub total: u32,
    pub zone: u32,
    pub image: u32,
}

impl HeaderSizes {
    /// Fields written for an image of `image_size` bytes. Sizes are stored as 32-bit.
    pub fn for_image(image_size: u64) -> Self {
        let image = image_size as u32;
        Self {
            total: image.wrapping_add(HEADER_SIZE as u32),
            zone: image
                .wrapping_add(2 * SECTOR_SIZE as u32)
                .wrapping_sub(0xC),
            image,
        }
    }
}

/// The three sector header at the front of a container
#[derive(Clone)]
pub struct ContainerHeader {
    template: Box<[u8; HEADER_SIZE]>,
}

impl std::fmt::Debug for ContainerHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContainerHeader({})", hex::encode(&self.template[..4]))
    }
}

impl Default for ContainerHeader {
    fn default() -> Self {
        let mut template = Box::new([0; HEADER_SIZE]);
        template[..4].copy_from_slice(&super::CVM_MAGIC.to_le_bytes());
        Self { template }
    }
}

impl ContainerHeader {
    /// Uses `bytes` as the header template. Size fields are overwritten on write.
    pub fn from_template(bytes: &[u8]) -> Result<Self, super::Error> {
        let template: Box<[u8; HEADER_SIZE]> = bytes
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| super::Error::HeaderTemplateSize(bytes.len()))?;
        Ok(Self { template })
    }

    pub fn template(&self) -> &[u8; HEADER_SIZE] {
        &self.template
    }

    pub fn write<W: WriteAt>(&self, writer: &mut W, image_size: u64) -> Result<(), super::Error> {
        let sizes = HeaderSizes::for_image(image_size);
        writer.write_at(0, &self.template[..])?;
        writer.write_u32_be_at(TOTAL_SIZE_OFFSET, sizes.total)?;
        writer.write_u32_be_at(ZONE_SIZE_OFFSET, sizes.zone)?;
        writer.write_u32_be_at(IMAGE_SIZE_OFFSET, sizes.image)?;
        Ok(())
    }

    pub fn read_sizes<R: ReadAt>(reader: &mut R) -> Result<HeaderSizes, super::Error> {
        Ok(HeaderSizes {
            total: reader.read_u32_be_at(TOTAL_SIZE_OFFSET)?,
            zone: reader.read_u32_be_at(ZONE_SIZE_OFFSET)?,
            image: reader.read_u32_be_at(IMAGE_SIZE_OFFSET)?,
        })
    }
}
