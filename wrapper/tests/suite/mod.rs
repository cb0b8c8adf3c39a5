mod cli_surface;
mod rejections;
