use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dt::{CallSite, Config, ConfigError, Instance};
use render::{Probe, RenderDebug as _, RenderText as _};

fn project_instance(root: &str) -> Instance {
    let mut conf = Config::new();
    conf.set_root_path(root);
    Instance::with_config(conf)
}

/// Writer handing its bytes back to the test.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("Buffer lock should not be poisoned");
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("Buffer lock should not be poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capturing_instance(root: &str) -> (Instance, SharedBuffer) {
    let mut conf = Config::new();
    conf.set_root_path(root);
    let buffer = SharedBuffer::default();
    (Instance::with_writer(conf, buffer.clone()), buffer)
}

fn captured(instance: &Instance, site: &CallSite, values: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    instance.print_to(&mut out, site, values).expect("Writing to a Vec cannot fail");
    String::from_utf8(out)
        .expect("Output should be valid UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_scenario_text_and_list() {
    let instance = project_instance("/project");
    let site = CallSite::new("/project/app/x.rb", 5);
    let values =
        vec![(&Probe(&"users")).render_value(), (&Probe(&vec![1, 2, 3])).render_value()];

    assert_eq!(
        captured(&instance, &site, &values),
        vec!["[DT app/x.rb:5] users", "[DT app/x.rb:5] [1, 2, 3]"]
    );
}

#[test]
fn test_relative_prefix() {
    let instance = project_instance("/project");
    let lines = captured(&instance, &CallSite::new("/project/lib/foo.rb", 10), &["v".into()]);
    assert_eq!(lines, vec!["[DT lib/foo.rb:10] v"]);
}

#[test]
fn test_empty_file_falls_back_verbatim() {
    let instance = project_instance("/project");
    let lines = captured(&instance, &CallSite::new("", 10), &["v".into()]);
    assert_eq!(lines, vec!["[DT :10] v"]);
}

#[test]
fn test_every_line_shares_the_tag() {
    let instance = project_instance("/project");
    let values: Vec<String> = (0..5).map(|i| (&Probe(&i)).render_value()).collect();
    let lines = captured(&instance, &CallSite::new("/project/src/lib.rs", 77), &values);

    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line, &format!("[DT src/lib.rs:77] {}", i));
    }
}

#[test]
fn test_root_change_applies_to_later_prints() {
    let instance = project_instance("/project");
    let site = CallSite::new("/project/app/models/user.rs", 2);
    assert_eq!(captured(&instance, &site, &["x".into()]), vec!["[DT app/models/user.rs:2] x"]);

    instance.configure(|conf| conf.set_root_path("/project/app"));
    assert_eq!(captured(&instance, &site, &["x".into()]), vec!["[DT models/user.rs:2] x"]);
}

#[test]
fn test_p_on_prints_caller_line_with_rendered_values() {
    let (instance, buffer) = capturing_instance(".");
    let users = vec![1, 2, 3];

    let line = line!() + 1;
    dt::p_on!(&instance, "users", users, None::<u8>);

    let tag = format!("[DT {}:{}]", file!(), line);
    assert_eq!(
        buffer.lines(),
        vec![format!("{} users", tag), format!("{} [1, 2, 3]", tag), format!("{} None", tag)]
    );
}

#[test]
fn test_p_on_falls_back_to_raw_file_under_absolute_root() {
    // `file!()` is workspace-relative, so an absolute root cannot relativize it
    let (instance, buffer) = capturing_instance("/project");

    let line = line!() + 1;
    dt::p_on!(&instance, String::from("owned"));

    assert_eq!(buffer.lines(), vec![format!("[DT {}:{}] owned", file!(), line)]);
}

#[test]
fn test_macros_evaluate_to_unit_and_borrow() {
    let (instance, buffer) = capturing_instance(".");
    let users = vec![String::from("ann"), String::from("bob")];
    let name = String::from("ann");

    let () = dt::p_on!(&instance, users, name,);
    // Still usable: values were borrowed
    assert_eq!(users.len(), 2);
    assert_eq!(name, "ann");
    assert_eq!(buffer.lines().len(), 2);

    dt::p_on!(&instance);
    assert_eq!(buffer.lines().len(), 2);

    dt::p!();
    dt::p!("shared instance", 1, None::<u8>);
}

#[test]
fn test_print_here_reports_caller() {
    let (instance, buffer) = capturing_instance(".");

    let line = line!() + 1;
    instance.print_here(&["direct".to_string()]);

    assert_eq!(buffer.lines(), vec![format!("[DT {}:{}] direct", file!(), line)]);
}

#[test]
fn test_configuration_from_options() {
    let conf = Config::from_options([("root_path", "/srv/app")])
        .expect("Failed to build config from options");
    let instance = Instance::with_config(conf);
    assert_eq!(instance.root_path(), PathBuf::from("/srv/app"));

    match Config::from_options([("root", "/srv/app")]) {
        Err(ConfigError::UnknownOption(key)) => assert_eq!(key, "root"),
        other => panic!("Expected UnknownOption error, got {:?}", other),
    }
}

#[test]
fn test_shared_configuration() {
    let root = dt::configure(|conf| conf.root_path().to_path_buf());
    assert_eq!(dt::instance().root_path(), root);
    assert!(Path::new(&root).is_absolute() || std::env::var_os(dt::ROOT_ENV_VAR).is_some());
}
