use byteorder::{ReadBytesExt, WriteBytesExt, BE, LE};
use std::io::{Read, Seek, SeekFrom, Write};

pub trait ReadAt {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), super::Error>;
    fn read_u32_le_at(&mut self, offset: u64) -> Result<u32, super::Error>;
    fn read_u32_be_at(&mut self, offset: u64) -> Result<u32, super::Error>;
    fn byte_len(&mut self) -> Result<u64, super::Error>;
}

pub trait WriteAt {
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<(), super::Error>;
    fn write_u32_be_at(&mut self, offset: u64, value: u32) -> Result<(), super::Error>;
}

impl<R: Read + Seek> ReadAt for R {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), super::Error> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)?;
        Ok(())
    }

    fn read_u32_le_at(&mut self, offset: u64) -> Result<u32, super::Error> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(self.read_u32::<LE>()?)
    }

    fn read_u32_be_at(&mut self, offset: u64) -> Result<u32, super::Error> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(self.read_u32::<BE>()?)
    }

    fn byte_len(&mut self) -> Result<u64, super::Error> {
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }
}

impl<W: Write + Seek> WriteAt for W {
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<(), super::Error> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(bytes)?;
        Ok(())
    }

    fn write_u32_be_at(&mut self, offset: u64, value: u32) -> Result<(), super::Error> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_u32::<BE>(value)?;
        Ok(())
    }
}
