//! Line commands typed into the headless host

use anyhow::{anyhow, bail, Context, Result};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use view3d_control::{ChromeAction, HostSession, ResizeEvent, WindowGeometry};
use view3d_core::{
    HostAction, LayerCollection, MapAction, MapBBox, MapLayer, ModeRequest, TaskAction, Theme,
    VIEW3D_TASK_ID,
};

pub const HELP: &str = "\
commands:
  mode <off|3d|3d2d|initial>   request a presentation mode
  task                         select the 3D task
  theme <id>                   replace the theme
  layers <id>[,<id>...]        replace the layer collection
  bbox <x0> <y0> <x1> <y1> [r] move the 2D extent
  maximize                     report a maximized window
  sync                         sync the 3D camera to the 2D extent
  fullscreen                   click the maximize control
  resize <w> <h>               external resize of the hosting window
  close                        close the 3D window
  retry                        retry a failed module load
  wait                         wait for a pending module load
  status                       print the current state
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mode(ModeRequest),
    Task,
    Theme(String),
    Layers(Vec<String>),
    BBox(MapBBox),
    Maximize,
    Sync,
    Fullscreen,
    Resize(ResizeEvent),
    Close,
    Retry,
    Wait,
    Status,
    Help,
    Quit,
}

fn parse_mode(value: &str) -> Result<ModeRequest> {
    match value {
        "off" | "2d" => Ok(ModeRequest::Disabled),
        "3d" => Ok(ModeRequest::Fullscreen),
        "3d2d" => Ok(ModeRequest::SplitScreen),
        "initial" => Ok(ModeRequest::Initial),
        other => bail!("unknown mode '{}'", other),
    }
}

fn parse_numbers<T: FromStr>(words: &[&str]) -> Result<Vec<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    words
        .iter()
        .map(|w| w.parse::<T>().with_context(|| format!("invalid number '{}'", w)))
        .collect()
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (name, rest) = words
            .split_first()
            .ok_or_else(|| anyhow!("empty command"))?;

        let command = match (*name, rest) {
            ("mode", [value]) => Command::Mode(parse_mode(value)?),
            ("task", []) => Command::Task,
            ("theme", [id]) => Command::Theme(id.to_string()),
            ("layers", [ids]) => Command::Layers(
                ids.split(',')
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            ("bbox", args) if args.len() == 4 || args.len() == 5 => {
                let values = parse_numbers::<f64>(args)?;
                Command::BBox(MapBBox {
                    bounds: [values[0], values[1], values[2], values[3]],
                    rotation: values.get(4).copied().unwrap_or(0.0),
                })
            }
            ("maximize", []) => Command::Maximize,
            ("sync", []) => Command::Sync,
            ("fullscreen", []) => Command::Fullscreen,
            ("resize", args) if args.len() == 2 => {
                let values = parse_numbers::<u32>(args)?;
                Command::Resize(ResizeEvent {
                    width: values[0],
                    height: values[1],
                })
            }
            ("close", []) => Command::Close,
            ("retry", []) => Command::Retry,
            ("wait", []) => Command::Wait,
            ("status", []) => Command::Status,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("cannot parse '{}', try 'help'", line.trim()),
        };
        Ok(command)
    }
}

/// Whether the host loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    pub fn apply(self, session: &mut HostSession, wait: Duration) -> Flow {
        match self {
            Command::Mode(request) => {
                session.dispatch(HostAction::set_view3d_mode(request));
            }
            Command::Task => {
                session.dispatch(HostAction::Task(TaskAction::select(VIEW3D_TASK_ID)));
            }
            Command::Theme(id) => {
                let title = id.clone();
                session.dispatch(HostAction::SetTheme(Arc::new(Theme::new(id, title))));
            }
            Command::Layers(ids) => {
                let layers = ids.iter().map(|id| MapLayer::new(id.clone(), id.clone()));
                session.dispatch(HostAction::SetLayers(Arc::new(LayerCollection::new(
                    layers.collect(),
                ))));
            }
            Command::BBox(bbox) => {
                session.dispatch(HostAction::Map(MapAction::SetBBox(bbox)));
            }
            Command::Maximize => {
                let geometry = WindowGeometry {
                    maximized: true,
                    ..Default::default()
                };
                if !session.controller_mut().on_geometry_changed(&geometry) {
                    println!("already fullscreen");
                }
            }
            Command::Sync => {
                if !session
                    .controller_mut()
                    .on_extra_control(ChromeAction::SyncViewToExtent)
                {
                    println!("no scene mounted");
                }
            }
            Command::Fullscreen => {
                session
                    .controller_mut()
                    .on_extra_control(ChromeAction::Maximize);
            }
            Command::Resize(event) => {
                if !session.controller_mut().on_external_resize(&event) {
                    println!("no scene mounted");
                }
            }
            Command::Close => session.controller_mut().on_close(),
            Command::Retry => {
                if !session.controller_mut().retry_load() {
                    println!("nothing to retry");
                }
            }
            Command::Wait => {
                if !session.settle(wait) {
                    println!("module still loading");
                }
            }
            Command::Status => println!("{}", status(session)),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

/// Current state as pretty JSON
pub fn status(session: &HostSession) -> String {
    let controller = session.controller();
    let state = session.state();
    let value = json!({
        "mode": controller.mode().to_string(),
        "phase": format!("{:?}", controller.phase()),
        "generation": controller.generation(),
        "module_loaded": controller.module_loaded(),
        "container": controller.embedded().map(|store| json!({
            "id": store.id(),
            "revision": store.revision(),
            "forwarded": store.forwarded(),
            "layers": store.state().layers.len(),
            "theme": store.state().theme.id,
        })),
        "window": controller.window(),
        "switcher_button": controller.switcher_button(),
        "host": {
            "revision": session.store().revision(),
            "task": state.task.id,
            "bbox": state.map.bbox.bounds,
            "notifications": state.windows.notifications,
        },
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "mode 3d".parse::<Command>().unwrap(),
            Command::Mode(ModeRequest::Fullscreen)
        );
        assert_eq!(
            "mode off".parse::<Command>().unwrap(),
            Command::Mode(ModeRequest::Disabled)
        );
        assert_eq!(
            "layers osm,roads".parse::<Command>().unwrap(),
            Command::Layers(vec!["osm".into(), "roads".into()])
        );
        assert_eq!(
            "resize 800 600".parse::<Command>().unwrap(),
            Command::Resize(ResizeEvent {
                width: 800,
                height: 600
            })
        );
        match "bbox 0 0 10 20".parse::<Command>().unwrap() {
            Command::BBox(bbox) => {
                assert_eq!(bbox.bounds, [0.0, 0.0, 10.0, 20.0]);
                assert_eq!(bbox.rotation, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!("  quit ".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_reject_bad_commands() {
        assert!("".parse::<Command>().is_err());
        assert!("mode 4d".parse::<Command>().is_err());
        assert!("bbox 1 2".parse::<Command>().is_err());
        assert!("resize wide 10".parse::<Command>().is_err());
        assert!("status now".parse::<Command>().is_err());
    }
}
