use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("atlas-dataviz").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_project_defaults() {
    let cli = parse(&["--dataset", "atlas.json", "project", "--cell", "Podocyte"]);
    assert_eq!(cli.dataset, Some(PathBuf::from("atlas.json")));
    match cli.command {
        Command::Project(args) => {
            assert_eq!(args.cell.as_deref(), Some("Podocyte"));
            assert_eq!(args.format, OutputFormat::Json);
            assert!(args.events.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_totals_text_format() {
    let cli = parse(&["totals", "--cell", "Podocyte", "--dataset", "a.json", "-v"]);
    assert_eq!(cli.verbose, 1);
    match cli.command {
        Command::Totals { cell, format } => {
            assert_eq!(cell, "Podocyte");
            assert_eq!(format, OutputFormat::Text);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_resolve_route_cell() {
    let cli = parse(&["project", "--route", "/data/Podocyte%20cell", "--format", "text"]);
    let Command::Project(args) = cli.command else {
        panic!("expected project");
    };
    let config = resolve_project_config(args).unwrap();
    assert_eq!(config.route_cell.as_deref(), Some("Podocyte cell"));
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_resolve_bad_route() {
    let cli = parse(&["project", "--route", "/schematic"]);
    let Command::Project(args) = cli.command else {
        panic!("expected project");
    };
    assert!(matches!(
        resolve_project_config(args),
        Err(AppError::InvalidRoute(_))
    ));
}

#[test]
fn test_run_without_dataset_fails() {
    let cli = parse(&["cells"]);
    assert!(matches!(run(cli), Err(AppError::MissingDataset)));
}
