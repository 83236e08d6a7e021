mod path;
mod nested;
