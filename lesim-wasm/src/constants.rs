//! Element ids of the home page template and server endpoints.

pub const DIV_HOME: &str = "div-home";

pub const TEXTAREA_CODE: &str = "textarea-code";
pub const TEXTAREA_CODE_DEMO: &str = "textarea-code-demo";
pub const INPUT_SCRIPT_NAME: &str = "input-scriptname";
pub const LINE_COUNTER: &str = "linecounter";
pub const EDITOR: &str = "editor";

pub const PLOTAREA_VERT: &str = "plotarea-vert";
pub const PLOTAREA_HORIZ: &str = "plotarea-horiz";
pub const PLOTAREA_DEMO: &str = "plotarea-demo";

pub const BUTTON_RUN: &str = "button-run";
pub const BUTTON_RUN_DEMO: &str = "button-run-demo";
pub const BUTTON_SAVE_SCRIPT: &str = "button-savescript";
pub const BUTTON_CLOSE_ALL: &str = "button-closeall";
pub const BUTTON_SETTINGS: &str = "button-settings";
pub const BUTTON_SHOW_DEMO: &str = "button-showdemo";
pub const SELECT_DEMO_SCRIPTS: &str = "select-demoscripts";
pub const DIV_DEMO: &str = "div-demo";

pub const ERRDLG_MODAL_BG: &str = "div-errordlg-modal-bg";
pub const ERRDLG_MESSAGE: &str = "div-errmsg";
pub const ERRDLG_DETAILS: &str = "textarea-errdlg-details";
pub const ERRDLG_DETAILS_BUTTON: &str = "button-errdlg-details";
pub const ERRDLG_CLOSE: &str = "errdlg-close";
pub const DETAILS_SHOW: &str = "Details >>";
pub const DETAILS_HIDE: &str = "<< Details";

pub const DIV_SETTINGS: &str = "div-settings";
pub const SETTINGS_SIZE_LABEL: &str = "settings-size";
pub const SETTINGS_PLOTLY_CLASS: &str = "settings-plotly";
pub const SETTINGS_MPL_CLASS: &str = "settings-mpl";
pub const SETTINGS_PLOT_TYPE: &str = "settings-plottype";
pub const SETTINGS_FILE_TYPE: &str = "settings-filetype";
pub const SETTINGS_ORIENTATION: &str = "settings-plotorientation";
pub const SETTINGS_WIDTH: &str = "settings-plotwidth";
pub const SETTINGS_HEIGHT: &str = "settings-plotheight";
pub const SETTINGS_LEGEND_X: &str = "settings-legendrelx";
pub const SETTINGS_LEGEND_Y: &str = "settings-legendrely";
pub const SETTINGS_LEGEND_X_ANCHOR: &str = "settings-legendanchorx";
pub const SETTINGS_LEGEND_Y_ANCHOR: &str = "settings-legendanchory";
pub const SETTINGS_LEGEND_ORIENTATION: &str = "settings-legendorientation";
pub const SETTINGS_PAPER_COLOR: &str = "settings-paperbgcolor";
pub const SETTINGS_PLOT_BGCOLOR: &str = "settings-plotbgcolor";
pub const SETTINGS_KEEP: &str = "settings-keep";

/// Editor height with the settings panel closed and open.
pub const EDITOR_STYLE_PLAIN: &str = "height:calc(100% - 110px);";
pub const EDITOR_STYLE_WITH_SETTINGS: &str = "height:calc(100% - 500px);";

/// Class of the div each Plotly chart is drawn into.
pub const CHART_CLASS: &str = "lesim-chart";
/// Wrapper of one chart and its toolbar.
pub const FIGURE_CLASS: &str = "lesim-figure";
pub const CHART_ACTION_ATTR: &str = "data-chart-action";
pub const GRID_ATTR: &str = "data-grid";
pub const CHART_BORDER: &str = "3px solid green";
pub const IMAGE_BORDER: &str = "3px solid blue";

pub const RUN_URL: &str = "/run";
pub const RUN_IMAGES_URL: &str = "/run_mpl_fig";
pub const GET_SETTINGS_URL: &str = "/get_settings/";
pub const SAVE_SETTINGS_URL: &str = "/save_settings";
pub const SAVE_SCRIPT_URL: &str = "/save";
pub const GET_DEMO_URL: &str = "/get_demo/";
