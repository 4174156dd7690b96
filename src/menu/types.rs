#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Status,
    MagicSelectChar,
    MagicList,
    Inventory,
}

impl MenuState {
    pub fn title(&self) -> &'static str {
        match self {
            MenuState::Main => "MAIN",
            MenuState::Status => "STATUS",
            MenuState::MagicSelectChar => "MAGIC",
            MenuState::MagicList => "MAGIC",
            MenuState::Inventory => "INVENTORY",
        }
    }
}

/// Entries of the main pause screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOption {
    Status,
    Magic,
    Inventory,
    Exit,
}

impl MainOption {
    pub const ALL: [MainOption; 4] = [
        MainOption::Status,
        MainOption::Magic,
        MainOption::Inventory,
        MainOption::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainOption::Status => "STATUS",
            MainOption::Magic => "MAGIC",
            MainOption::Inventory => "INVENTORY",
            MainOption::Exit => "EXIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The player left the menu; the owner should drop it.
    Close,
}
