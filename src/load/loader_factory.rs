use crate::config::loader_config::LoaderConfig;
use crate::load::excel_loader::ExcelLoader;
use crate::load::json_course_loader::JsonCourseLoader;
use crate::load::traits::Loadable;

pub struct LoaderFactory;

impl LoaderFactory {
    pub fn from_config(config: LoaderConfig) -> Box<dyn Loadable> {
        match config {
            LoaderConfig::Excel { output_path } => Box::new(ExcelLoader::new(output_path)),
            LoaderConfig::Json {
                output_dir,
                create_dir,
            } => Box::new(JsonCourseLoader::new(output_dir, create_dir)),
        }
    }
}
