#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Resize,

    InputChar(char),
    Backspace,
    ClearInput,
    Generate,
    CycleMethod,

    ToggleGallery,
    RefreshGallery,
    FocusNext,
    FocusInput,
    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    DeleteSelected,

    Export,
    LoadStats,
    ToggleHelp,
}
