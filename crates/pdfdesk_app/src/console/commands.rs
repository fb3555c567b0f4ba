use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use pdfdesk_core::{FileHandle, FormField, Msg, OperationKind, RotationAngle, Slot};

/// Field name for the rotation angle, which is a choice rather than text.
const ANGLE_FIELD: &str = "rotate.angle";

pub const HELP: &str = "\
Commands:
  select <slot> <path>...     choose files for a slot (replaces the list)
  drop <slot> <path>...       drop files onto a slot
  drag <slot>                 a drag enters the slot's drop zone
  leave <slot>                the drag leaves without dropping
  remove <slot> <index>       remove one file from a slot
  set <field> <value>         edit a form field
  submit <operation>          run an operation
  scroll <delta>              scroll the text preview
  help                        show this text
  quit                        exit
Slots: merge, watermark, extract, split, rotate
Operations: merge, watermark, extract, split, rotate, cover-letter
Fields: merge.output_name, watermark.text, watermark.output_name,
  split.pages_per_file, rotate.angle (90|180|270), rotate.output_name,
  cover.name, cover.position, cover.company, cover.email, cover.phone,
  cover.output_name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "select" => {
            let (slot, paths) = slot_and_rest(rest)?;
            Command::Dispatch(Msg::FilesSelected {
                slot,
                files: file_handles(paths)?,
            })
        }
        "drop" => {
            let (slot, paths) = slot_and_rest(rest)?;
            Command::Dispatch(Msg::FilesDropped {
                slot,
                files: file_handles(paths)?,
            })
        }
        "drag" => Command::Dispatch(Msg::DragEntered {
            slot: parse_slot(rest)?,
        }),
        "leave" => Command::Dispatch(Msg::DragLeft {
            slot: parse_slot(rest)?,
        }),
        "remove" => {
            let (slot, index) = slot_and_rest(rest)?;
            let index = index
                .parse::<usize>()
                .with_context(|| format!("invalid index {index:?}"))?;
            Command::Dispatch(Msg::RemoveFileClicked { slot, index })
        }
        "set" => parse_set(rest)?,
        "submit" => {
            let kind = OperationKind::from_label(rest)
                .ok_or_else(|| anyhow!("unknown operation {rest:?}"))?;
            Command::Dispatch(Msg::SubmitClicked(kind))
        }
        "scroll" => {
            let delta = rest
                .parse::<isize>()
                .with_context(|| format!("invalid scroll delta {rest:?}"))?;
            Command::Dispatch(Msg::PreviewScrolled(delta))
        }
        other => bail!("unknown command {other:?}; type `help`"),
    };
    Ok(command)
}

fn parse_set(rest: &str) -> anyhow::Result<Command> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        bail!("usage: set <field> <value>");
    }

    if name.eq_ignore_ascii_case(ANGLE_FIELD) {
        let angle = value
            .parse::<u16>()
            .ok()
            .and_then(RotationAngle::from_degrees)
            .ok_or_else(|| anyhow!("angle must be 90, 180 or 270, got {value:?}"))?;
        return Ok(Command::Dispatch(Msg::AngleSelected(angle)));
    }

    let field = FormField::from_label(name).ok_or_else(|| anyhow!("unknown field {name:?}"))?;
    Ok(Command::Dispatch(Msg::FieldChanged {
        field,
        value: value.to_string(),
    }))
}

fn slot_and_rest(rest: &str) -> anyhow::Result<(Slot, &str)> {
    let (label, tail) = match rest.split_once(char::is_whitespace) {
        Some((label, tail)) => (label, tail.trim()),
        None => (rest, ""),
    };
    Ok((parse_slot(label)?, tail))
}

fn parse_slot(label: &str) -> anyhow::Result<Slot> {
    Slot::from_label(label.trim()).ok_or_else(|| anyhow!("unknown slot {label:?}"))
}

fn file_handles(paths: &str) -> anyhow::Result<Vec<FileHandle>> {
    paths.split_whitespace().map(file_handle).collect()
}

fn file_handle(path: &str) -> anyhow::Result<FileHandle> {
    let path = Path::new(path);
    let meta = fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    Ok(FileHandle::new(path, meta.len()))
}
