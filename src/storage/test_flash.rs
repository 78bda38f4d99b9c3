use embedded_storage::{ReadStorage, Storage};

pub(crate) const SECTOR: u32 = 4096;

pub(crate) struct RamFlash {
    pub(crate) bytes: Vec<u8>,
    pub(crate) writes: usize,
    pub(crate) fail_writes: bool,
}

impl RamFlash {
    pub(crate) fn erased(sectors: u32) -> Self {
        Self {
            bytes: vec![0xFF; (sectors * SECTOR) as usize],
            writes: 0,
            fail_writes: false,
        }
    }
}

impl ReadStorage for RamFlash {
    type Error = ();

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let end = start.checked_add(bytes.len()).ok_or(())?;
        bytes.copy_from_slice(self.bytes.get(start..end).ok_or(())?);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for RamFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        let start = offset as usize;
        let end = start.checked_add(bytes.len()).ok_or(())?;
        self.bytes.get_mut(start..end).ok_or(())?.copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}
