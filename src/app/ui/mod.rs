mod controls;
mod debug;
mod panels;
