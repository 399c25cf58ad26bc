mod html;
mod treeviz;
