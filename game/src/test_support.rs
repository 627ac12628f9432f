use std::{
    collections::BTreeMap,
    io,
    sync::{Arc, Mutex},
};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::screen::{Key, KeySource, Screen};

#[derive(Default)]
pub(crate) struct Canvas {
    pub(crate) cells: BTreeMap<(u16, u16), char>,
    pub(crate) refreshes: usize,
    pub(crate) clears: usize,
    pub(crate) echo: Option<bool>,
    pub(crate) cursor_visible: Option<bool>,
    pub(crate) shut_down: bool,
}

impl Canvas {
    pub(crate) fn at(&self, row: u16, col: u16) -> char {
        self.cells.get(&(row, col)).copied().unwrap_or(' ')
    }

    pub(crate) fn text(&self, row: u16, col: u16, len: u16) -> String {
        (col..col + len).map(|col| self.at(row, col)).collect()
    }
}

/// an in-memory screen. clones share the same canvas so a test can inspect what a dispatcher
/// running on another thread drew.
#[derive(Clone, Default)]
pub(crate) struct RecordingScreen {
    canvas: Arc<Mutex<Canvas>>,
}

impl RecordingScreen {
    pub(crate) fn canvas(&self) -> std::sync::MutexGuard<'_, Canvas> {
        self.canvas.lock().unwrap()
    }
}

impl Screen for RecordingScreen {
    fn move_and_print(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        let mut canvas = self.canvas();
        for (offset, ch) in text.chars().enumerate() {
            canvas.cells.insert((row, col + offset as u16), ch);
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut canvas = self.canvas();
        canvas.cells.clear();
        canvas.clears += 1;
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.canvas().refreshes += 1;
        Ok(())
    }

    fn set_echo(&mut self, enabled: bool) -> io::Result<()> {
        self.canvas().echo = Some(enabled);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.canvas().cursor_visible = Some(visible);
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.canvas().shut_down = true;
        Ok(())
    }
}

/// keys fed in by the test. reading blocks until a key is sent and fails once the sender is
/// dropped.
pub(crate) struct ScriptedKeys {
    keys_rx: Receiver<Key>,
}

impl ScriptedKeys {
    pub(crate) fn new() -> (Sender<Key>, Self) {
        let (keys_tx, keys_rx) = unbounded();
        (keys_tx, Self { keys_rx })
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        self.keys_rx
            .recv()
            .map_err(|err| io::Error::new(io::ErrorKind::BrokenPipe, err))
    }
}
