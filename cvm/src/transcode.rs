use crate::ext::{ReadAt, WriteAt};
use crate::{
    BuiltinXorgen, ContainerHeader, Direction, HeaderSizes, KeySchedule, SectorCipher,
    TableSchedule, XorIv, XorgenMethods, CVM_MAGIC, DESCRIPTOR_SECTORS, HEADER_SECTORS,
    HEADER_SIZE, ISO_MAGIC, MIN_INPUT_SIZE, SECTOR_SIZE,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// First sector after the descriptor window, copied verbatim from here on
const TAIL_SECTOR: u64 = *DESCRIPTOR_SECTORS.end() as u64 + 1;

fn iso_offset(sector: u64) -> u64 {
    sector * SECTOR_SIZE as u64
}

fn cvm_offset(sector: u64) -> u64 {
    (HEADER_SECTORS as u64 + sector) * SECTOR_SIZE as u64
}

fn check_size(size: u64) -> Result<(), super::Error> {
    if size < MIN_INPUT_SIZE {
        return Err(super::Error::InputTooSmall(size));
    }
    Ok(())
}

pub struct TranscoderBuilder {
    product_code: Vec<u8>,
    iv: Option<XorIv>,
    header: ContainerHeader,
    xorgen: Box<dyn XorgenMethods>,
    schedule: Box<dyn KeySchedule>,
}

impl Default for TranscoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscoderBuilder {
    pub fn new() -> Self {
        Self {
            product_code: super::PRODUCT_CODE.as_bytes().to_vec(),
            iv: None,
            header: Default::default(),
            xorgen: Box::new(BuiltinXorgen),
            schedule: Box::new(TableSchedule::default()),
        }
    }
    /// Product code the IV is derived from, read up to the first NUL
    pub fn product_code(mut self, product_code: impl AsRef<[u8]>) -> Self {
        self.product_code = product_code.as_ref().to_vec();
        self
    }
    /// Use a known IV instead of deriving one from the product code
    pub fn iv(mut self, iv: XorIv) -> Self {
        self.iv = Some(iv);
        self
    }
    pub fn header(mut self, header: ContainerHeader) -> Self {
        self.header = header;
        self
    }
    pub fn xorgen(mut self, xorgen: impl XorgenMethods + 'static) -> Self {
        self.xorgen = Box::new(xorgen);
        self
    }
    pub fn schedule(mut self, schedule: impl KeySchedule + 'static) -> Self {
        self.schedule = Box::new(schedule);
        self
    }
    pub fn build(self) -> Result<Transcoder, super::Error> {
        let iv = match self.iv {
            Some(iv) => iv,
            None => XorIv::derive(&self.product_code, None, crate::lookup_table())?,
        };
        debug!(?iv, "initialized xor iv");
        Ok(Transcoder {
            cipher: SectorCipher {
                iv,
                xorgen: self.xorgen,
                schedule: self.schedule,
            },
            header: self.header,
        })
    }
}

/// Result of a file to file run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub direction: Direction,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
}

#[derive(Debug)]
pub struct Transcoder {
    cipher: SectorCipher,
    header: ContainerHeader,
}

impl Transcoder {
    pub fn cipher(&self) -> &SectorCipher {
        &self.cipher
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// Looks for the CVM tag at offset 0, then for the ISO9660 primary volume
    /// descriptor at sector 0x10
    pub fn detect<R: Read + Seek>(reader: &mut R) -> Result<Direction, super::Error> {
        let len = reader.byte_len()?;
        let tag_at = |reader: &mut R, offset: u64| -> Result<Option<u32>, super::Error> {
            if len < offset + 4 {
                return Ok(None);
            }
            reader.read_u32_le_at(offset).map(Some)
        };
        if tag_at(reader, 0)? == Some(CVM_MAGIC) {
            Ok(Direction::Decode)
        } else if tag_at(reader, iso_offset(*DESCRIPTOR_SECTORS.start() as u64))? == Some(ISO_MAGIC)
        {
            Ok(Direction::Encode)
        } else {
            Err(super::Error::UnknownFormat)
        }
    }

    fn resolve<R: Read + Seek>(
        reader: &mut R,
        direction: Option<Direction>,
    ) -> Result<Direction, super::Error> {
        match direction {
            Some(direction) => {
                info!(
                    "{direction}: requested by caller, outputting .{}",
                    direction.output_extension()
                );
                Ok(direction)
            }
            None => {
                let direction = Self::detect(reader)?;
                let tag = match direction {
                    Direction::Decode => "CVM",
                    Direction::Encode => "ISO9660",
                };
                info!(
                    "{direction}: auto-detected {tag} header on input, outputting .{}",
                    direction.output_extension()
                );
                Ok(direction)
            }
        }
    }

    /// Wraps an ISO9660 image into a container. Sectors 0x00-0x0F of the image
    /// are not read; the header and the zero gap after it stand in for them.
    pub fn encode<R: Read + Seek, W: Write + Seek>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(), super::Error> {
        let input_size = reader.byte_len()?;
        check_size(input_size)?;

        self.header.write(writer, input_size)?;
        self.transfer_descriptors(reader, writer, iso_offset, cvm_offset)?;
        copy_tail(
            reader,
            writer,
            iso_offset(TAIL_SECTOR),
            cvm_offset(TAIL_SECTOR),
            input_size - iso_offset(TAIL_SECTOR),
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Unwraps a container into an ISO9660 image
    pub fn decode<R: Read + Seek, W: Write + Seek>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(), super::Error> {
        let input_size = reader.byte_len()?;
        check_size(input_size)?;

        let sizes = ContainerHeader::read_sizes(reader)?;
        let expected = HeaderSizes::for_image(input_size - HEADER_SIZE as u64);
        if sizes != expected {
            warn!(?sizes, ?expected, "container header sizes do not match input size");
        }

        self.transfer_descriptors(reader, writer, cvm_offset, iso_offset)?;
        copy_tail(
            reader,
            writer,
            cvm_offset(TAIL_SECTOR),
            iso_offset(TAIL_SECTOR),
            input_size - cvm_offset(TAIL_SECTOR),
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Runs `direction`, or the detected direction if none is given
    pub fn transcode<R: Read + Seek, W: Write + Seek>(
        &self,
        reader: &mut R,
        writer: &mut W,
        direction: Option<Direction>,
    ) -> Result<Direction, super::Error> {
        check_size(reader.byte_len()?)?;
        let direction = Self::resolve(reader, direction)?;
        match direction {
            Direction::Encode => self.encode(reader, writer)?,
            Direction::Decode => self.decode(reader, writer)?,
        }
        Ok(direction)
    }

    /// Transcodes `input` into `output`, which defaults to the input path with
    /// `.cvm` or `.iso` appended. The output is only created once the input
    /// passed the size check and its direction is known.
    pub fn transcode_path(
        &self,
        input: &Path,
        output: Option<&Path>,
        direction: Option<Direction>,
    ) -> Result<Outcome, super::Error> {
        let mut reader =
            BufReader::new(File::open(input).map_err(|source| super::Error::InputOpen {
                path: input.display().to_string(),
                source,
            })?);
        let input_size = reader.byte_len()?;
        check_size(input_size)?;
        let direction = Self::resolve(&mut reader, direction)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| direction.output_path(input));
        let mut writer =
            BufWriter::new(File::create(&output).map_err(|source| super::Error::OutputCreate {
                path: output.display().to_string(),
                source,
            })?);

        let output_size = match direction {
            Direction::Encode => {
                self.encode(&mut reader, &mut writer)?;
                input_size + HEADER_SIZE as u64
            }
            Direction::Decode => {
                self.decode(&mut reader, &mut writer)?;
                input_size - HEADER_SIZE as u64
            }
        };
        Ok(Outcome {
            direction,
            output,
            input_size,
            output_size,
        })
    }

    fn transfer_descriptors<R: Read + Seek, W: Write + Seek>(
        &self,
        reader: &mut R,
        writer: &mut W,
        source: fn(u64) -> u64,
        target: fn(u64) -> u64,
    ) -> Result<(), super::Error> {
        let mut sector = [0u8; SECTOR_SIZE];
        for index in DESCRIPTOR_SECTORS {
            reader.read_at(source(index as u64), &mut sector)?;
            self.cipher.cipher_sector(&mut sector, index)?;
            writer.write_at(target(index as u64), &sector)?;
        }
        Ok(())
    }
}

/// Copies `remaining` bytes one sector at a time, the last chunk truncated
fn copy_tail<R: Read + Seek, W: Write + Seek>(
    reader: &mut R,
    writer: &mut W,
    from: u64,
    to: u64,
    mut remaining: u64,
) -> Result<(), super::Error> {
    reader.seek(SeekFrom::Start(from))?;
    writer.seek(SeekFrom::Start(to))?;
    let mut buf = [0u8; SECTOR_SIZE];
    while remaining > 0 {
        let n = remaining.min(SECTOR_SIZE as u64) as usize;
        reader.read_exact(&mut buf[..n])?;
        writer.write_all(&buf[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}
