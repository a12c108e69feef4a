use console::Style;
use handpan_core::dispatch::Viewer;
use handpan_core::gesture::GestureCommand;
use handpan_core::viewport::ViewPhase;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    command: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            command: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Running count of the commands a session produced.
#[derive(Debug, Default)]
pub struct CommandTally {
    pub next: u32,
    pub previous: u32,
    pub resets: u32,
    pub zoom_in: u32,
    pub zoom_out: u32,
    /// Pinch frames whose delta fell inside the dead zone.
    pub zoom_idle: u32,
    pub pans: u32,
    pub pan_distance: f32,
}

impl CommandTally {
    pub fn add(&mut self, command: &GestureCommand) {
        match *command {
            GestureCommand::AdvanceNext => self.next += 1,
            GestureCommand::AdvancePrevious => self.previous += 1,
            GestureCommand::Reset => self.resets += 1,
            GestureCommand::ZoomBy(delta) if delta > 0 => self.zoom_in += 1,
            GestureCommand::ZoomBy(delta) if delta < 0 => self.zoom_out += 1,
            GestureCommand::ZoomBy(_) => self.zoom_idle += 1,
            GestureCommand::PanBy { dx, dy } => {
                self.pans += 1;
                self.pan_distance += dx.hypot(dy);
            }
        }
    }

    pub fn total(&self) -> u32 {
        self.next
            + self.previous
            + self.resets
            + self.zoom_in
            + self.zoom_out
            + self.zoom_idle
            + self.pans
    }
}

/// One colored line for a command as it happens.
pub fn format_command(frame: u64, command: &GestureCommand) -> String {
    let s = Styles::new();
    let text = match *command {
        GestureCommand::AdvanceNext => s.command.apply_to("next image".to_string()),
        GestureCommand::AdvancePrevious => s.command.apply_to("previous image".to_string()),
        GestureCommand::Reset => s.disabled.apply_to("released".to_string()),
        GestureCommand::ZoomBy(delta) => s.command.apply_to(format!("zoom {delta:+}")),
        GestureCommand::PanBy { dx, dy } => s.command.apply_to(format!("pan {dx:+.1}, {dy:+.1}")),
    };
    format!("{:>7}  {}", frame, text)
}

pub fn print_session_summary(source: &str, frames: u64, tally: &CommandTally, viewer: Option<&Viewer>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Gesture Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(source));
    println!("  {:<14}{}", s.label.apply_to("Frames"), s.value.apply_to(frames));
    println!("  {:<14}{}", s.label.apply_to("Commands"), s.value.apply_to(tally.total()));
    println!();

    println!("  {}", s.header.apply_to("Navigation"));
    println!("    {:<12}{}", s.label.apply_to("Next"), s.value.apply_to(tally.next));
    println!("    {:<12}{}", s.label.apply_to("Previous"), s.value.apply_to(tally.previous));
    println!("    {:<12}{}", s.label.apply_to("Released"), s.value.apply_to(tally.resets));
    println!();

    println!("  {}", s.header.apply_to("Zoom / Pan"));
    println!("    {:<12}{}", s.label.apply_to("Zoom in"), s.value.apply_to(tally.zoom_in));
    println!("    {:<12}{}", s.label.apply_to("Zoom out"), s.value.apply_to(tally.zoom_out));
    println!("    {:<12}{}", s.label.apply_to("Dead zone"), s.value.apply_to(tally.zoom_idle));
    println!(
        "    {:<12}{} ({:.0} px)",
        s.label.apply_to("Pan"),
        s.value.apply_to(tally.pans),
        tally.pan_distance
    );
    println!();

    let Some(viewer) = viewer else {
        return;
    };
    println!("  {}", s.header.apply_to("Viewer"));
    match viewer.images().current() {
        Some(path) => println!(
            "    {:<12}{} ({}/{})",
            s.label.apply_to("Image"),
            s.path.apply_to(path.display()),
            viewer.images().current_index() + 1,
            viewer.images().len()
        ),
        None => println!("    {:<12}{}", s.label.apply_to("Image"), s.disabled.apply_to("none")),
    }
    let state = viewer.viewport().state();
    let phase = match viewer.viewport().phase() {
        ViewPhase::Empty => "empty",
        ViewPhase::Fitted => "fitted",
        ViewPhase::Zoomed => "zoomed",
    };
    println!("    {:<12}{}", s.label.apply_to("View"), s.command.apply_to(phase));
    println!(
        "    {:<12}{} (level {})",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.3}", state.scale)),
        state.zoom_level
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pan offset"),
        s.value.apply_to(format!("{:.1}, {:.1}", state.pan_offset.x, state.pan_offset.y))
    );
    println!();
}
