use std::{fs, io, path::Path, sync::Arc};

use thiserror::Error;

// -------------------------------------------------------------------------------------------------

type ParseErr<'a> = nom::Err<nom::error::Error<&'a [u8]>>;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("Empty ROM file")]
    Empty,
    #[error("Invalid ROM size (not a multiple of 1024 bytes): {0} ({0:#x})")]
    Size(usize),
    #[error("Could not read ROM file: {0}")]
    Io(#[from] io::Error),
    #[error("Slice {begin:#X}..{end:#X} is outside of the ROM")]
    Slice { begin: usize, end: usize },
    #[error("Could not parse ROM slice at {0:#X}")]
    Parse(usize),
}

// -------------------------------------------------------------------------------------------------

/// Size of the header some copier devices put in front of the image.
pub const SMC_HEADER_SIZE: usize = 0x200;

/// Cartridge image without any copier header. Cheap to clone.
#[derive(Clone)]
pub struct Rom(pub Arc<[u8]>);

impl Rom {
    pub fn new(mut data: Vec<u8>) -> Result<Self, RomError> {
        if !data.is_empty() {
            match data.len() % 0x400 {
                SMC_HEADER_SIZE => {
                    log::info!("Stripping {SMC_HEADER_SIZE:#X}-byte copier header");
                    data.drain(..SMC_HEADER_SIZE);
                    if data.is_empty() {
                        return Err(RomError::Empty);
                    }
                    Ok(Self(Arc::from(data)))
                }
                0 => Ok(Self(Arc::from(data))),
                _ => Err(RomError::Size(data.len())),
            }
        } else {
            Err(RomError::Empty)
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        log::info!("Reading ROM from file: {}", path.as_ref().display());
        Self::new(fs::read(path)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte at `index`, mirrored over the image length.
    pub fn mirrored(&self, index: usize) -> u8 {
        self.0[index % self.0.len()]
    }

    pub fn slice(&self, begin: usize, size: usize) -> Result<&[u8], RomError> {
        let end = begin + size;
        self.0.get(begin..end).ok_or(RomError::Slice { begin, end })
    }

    /// Runs a `nom` parser over `size` bytes at `begin`.
    pub fn parse<'r, Ret, Parser>(&'r self, begin: usize, size: usize, mut f: Parser) -> Result<Ret, RomError>
    where
        Parser: nom::Parser<&'r [u8], Ret, nom::error::Error<&'r [u8]>>,
    {
        let bytes = self.slice(begin, size)?;
        let (_, ret) = f.parse(bytes).map_err(|_: ParseErr| RomError::Parse(begin))?;
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use nom::number::complete::le_u16;

    use super::*;

    #[test]
    fn strips_copier_header() {
        let mut data = vec![0xFF; SMC_HEADER_SIZE];
        data.extend(std::iter::repeat(0xAB).take(0x8000));
        let rom = Rom::new(data).unwrap();
        assert_eq!(rom.len(), 0x8000);
        assert_eq!(rom.as_bytes()[0], 0xAB);
    }

    #[test]
    fn rejects_odd_sizes() {
        assert!(matches!(Rom::new(vec![]), Err(RomError::Empty)));
        assert!(matches!(Rom::new(vec![0; 0x8001]), Err(RomError::Size(0x8001))));
    }

    #[test]
    fn parse_reads_little_endian() {
        let mut data = vec![0; 0x400];
        data[0x10] = 0x34;
        data[0x11] = 0x12;
        let rom = Rom::new(data).unwrap();
        assert_eq!(rom.parse(0x10, 2, le_u16).unwrap(), 0x1234);
        assert!(matches!(rom.parse(0x3FF, 2, le_u16), Err(RomError::Slice { .. })));
    }

    #[test]
    fn mirrored_wraps_by_length() {
        let rom = Rom::new((0..0x400).map(|i| i as u8).collect()).unwrap();
        assert_eq!(rom.mirrored(0x401), 0x01);
    }
}
