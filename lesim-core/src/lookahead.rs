use crate::directive::Directive;

/// Decide whether the `plot` command just handled closes the current subplot
/// run. `rest` holds the commands after it.
///
/// The run ends at the end of the list or at the next `figure`; another
/// `plot` or `subplot` keeps it open. `legend` and `export` are skipped.
pub fn is_last_plot_for_subplot(rest: &[Directive]) -> bool {
    for cmd in rest {
        match cmd {
            Directive::Plot { .. } | Directive::Subplot(_) => return false,
            Directive::Figure { .. } => return true,
            Directive::Legend | Directive::Export(_) => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{AxisProps, ExportLink, Subplot};

    fn plot() -> Directive {
        Directive::Plot { series: Vec::new() }
    }

    fn subplot() -> Directive {
        Directive::Subplot(Subplot {
            rows: 2,
            cols: 1,
            index: 2,
            axes: AxisProps::default(),
        })
    }

    fn export() -> Directive {
        Directive::Export(ExportLink {
            path: "a".into(),
            display_name: None,
        })
    }

    #[test]
    fn end_of_list_closes_the_run() {
        assert!(is_last_plot_for_subplot(&[]));
        assert!(is_last_plot_for_subplot(&[Directive::Legend, export()]));
    }

    #[test]
    fn figure_closes_the_run() {
        assert!(is_last_plot_for_subplot(&[
            Directive::Legend,
            Directive::Figure { title: None },
            plot()
        ]));
    }

    #[test]
    fn plot_or_subplot_keeps_it_open() {
        assert!(!is_last_plot_for_subplot(&[plot()]));
        assert!(!is_last_plot_for_subplot(&[export(), subplot(), plot()]));
        assert!(!is_last_plot_for_subplot(&[
            Directive::Legend,
            plot(),
            Directive::Figure { title: None }
        ]));
    }
}
