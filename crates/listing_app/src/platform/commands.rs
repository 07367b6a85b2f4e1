use listing_core::{ItemId, Msg};

pub const HELP: &str = "\
commands:
  more              load the next page
  page <n>          request page n (page 1 starts over)
  reload            same as `page 1`
  rm <id>           remove a file
  drop <name>...    upload files by name
  grant | revoke    toggle upload permission
  show              print the listing
  help              print this text
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Msg),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Send(Msg::NoOp));
    };

    let command = match verb {
        "more" | "next" => Command::Send(Msg::LoadMore),
        "page" => {
            let raw = words.next().ok_or("usage: page <n>")?;
            let page = raw
                .parse::<u32>()
                .map_err(|err| format!("bad page number {raw:?}: {err}"))?;
            if page == 0 {
                return Err("pages start at 1".to_string());
            }
            Command::Send(Msg::RequestPage(page))
        }
        "reload" => Command::Send(Msg::RequestPage(1)),
        "rm" | "remove" => {
            let id = words.next().ok_or("usage: rm <id>")?;
            Command::Send(Msg::RemoveClicked(ItemId::from(id)))
        }
        "drop" | "upload" => {
            let files: Vec<String> = words.by_ref().map(ToOwned::to_owned).collect();
            if files.is_empty() {
                return Err("usage: drop <name>...".to_string());
            }
            Command::Send(Msg::FilesDropped(files))
        }
        "grant" => Command::Send(Msg::PermissionsChanged { can_upload: true }),
        "revoke" => Command::Send(Msg::PermissionsChanged { can_upload: false }),
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; try `help`")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }
    Ok(command)
}
